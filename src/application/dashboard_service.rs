// Dashboard service - Use case for building the solar panel view
use crate::application::errors::StoreResult;
use crate::application::series_store::TimeSeriesStore;
use crate::domain::dashboard::{
    format_count, format_kwh, ChartData, ChartSelection, Dashboard, LabeledValue, SelectedDetail,
    SummaryRow, DATASET_LABEL,
};
use crate::domain::resolution::Resolution;
use crate::domain::series::{Aggregate, Sample, SeriesEntry};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<TimeSeriesStore>,
}

impl DashboardService {
    pub fn new(store: Arc<TimeSeriesStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    /// Months when mapped, otherwise the first mapped resolution.
    pub fn initial_resolution(&self) -> Option<Resolution> {
        if self.store.is_enabled(Resolution::Months) {
            return Some(Resolution::Months);
        }
        self.store.enabled_resolutions().into_iter().next()
    }

    pub async fn get_dashboard(
        &self,
        resolution: Resolution,
        selection: ChartSelection,
    ) -> StoreResult<Dashboard> {
        let entry = self.store.load(resolution).await?;
        let window = TimeSeriesStore::window(&entry, resolution);

        let chart = build_chart(resolution, selection, window);
        let summary = self.build_summary(resolution).await;
        let detail = build_detail(&entry, resolution, window);

        let status = format!(
            "Loaded {} points • Showing {} • Total: {} kWh",
            format_count(entry.len()),
            format_count(window.len()),
            format_kwh(entry.aggregate.total)
        );

        Ok(Dashboard {
            resolution,
            status,
            chart,
            summary,
            detail,
        })
    }

    /// One row per mapped resolution that is already cached
    async fn build_summary(&self, active: Resolution) -> Vec<SummaryRow> {
        let mut rows = Vec::new();

        for resolution in self.store.enabled_resolutions() {
            let Some(entry) = self.store.cached(resolution).await else {
                continue;
            };
            rows.push(SummaryRow {
                resolution,
                label: resolution.label().to_string(),
                total: entry.aggregate.total,
                points: entry.len(),
                start: entry.aggregate.start,
                end: entry.aggregate.end,
                active: resolution == active,
            });
        }

        rows
    }
}

pub fn format_label(resolution: Resolution, sample: &Sample) -> String {
    sample
        .timestamp
        .format(resolution.label_format())
        .to_string()
}

fn build_chart(resolution: Resolution, selection: ChartSelection, window: &[Sample]) -> ChartData {
    let kind = selection.resolve(resolution);

    ChartData {
        title: format!("{} — {}", resolution.label(), kind.title_suffix()),
        kind,
        dataset_label: DATASET_LABEL.to_string(),
        labels: window.iter().map(|s| format_label(resolution, s)).collect(),
        values: window.iter().map(|s| s.value).collect(),
    }
}

fn build_detail(entry: &SeriesEntry, resolution: Resolution, window: &[Sample]) -> SelectedDetail {
    let skip = window.len().saturating_sub(resolution.detail_points());
    let recent = window[skip..]
        .iter()
        .map(|s| LabeledValue::new(format_label(resolution, s), s.value))
        .collect();

    SelectedDetail {
        title: format!("Selected Detail — {}", resolution.label()),
        total_all: entry.aggregate.total,
        shown: Aggregate::of(window),
        recent,
    }
}
