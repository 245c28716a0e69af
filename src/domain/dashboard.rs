// Dashboard domain model - view state handed to the charting front end
use super::resolution::{ChartKind, Resolution};
use super::series::Aggregate;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DATASET_LABEL: &str = "Solar production (kWh)";

/// Requested chart style. `Auto` follows the resolution default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSelection {
    #[default]
    Auto,
    Line,
    Bar,
}

impl ChartSelection {
    pub fn resolve(&self, resolution: Resolution) -> ChartKind {
        match self {
            ChartSelection::Auto => resolution.default_chart_kind(),
            ChartSelection::Line => ChartKind::Line,
            ChartSelection::Bar => ChartKind::Bar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chart type '{0}' (expected auto, line or bar)")]
pub struct UnknownChartSelection(pub String);

impl FromStr for ChartSelection {
    type Err = UnknownChartSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ChartSelection::Auto),
            "line" => Ok(ChartSelection::Line),
            "bar" => Ok(ChartSelection::Bar),
            _ => Err(UnknownChartSelection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub resolution: Resolution,
    pub status: String,
    pub chart: ChartData,
    pub summary: Vec<SummaryRow>,
    pub detail: SelectedDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub resolution: Resolution,
    pub label: String,
    pub total: f64,
    pub points: usize,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedDetail {
    pub title: String,
    pub total_all: f64,
    pub shown: Aggregate,
    pub recent: Vec<LabeledValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

impl LabeledValue {
    pub fn new(label: String, value: f64) -> Self {
        Self { label, value }
    }
}

/// Round to whole kWh and group thousands: `12345.6` → `"12,346"`.
pub fn format_kwh(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Group thousands of a count: `12345` → `"12,345"`.
pub fn format_count(count: usize) -> String {
    format_kwh(count as f64)
}
