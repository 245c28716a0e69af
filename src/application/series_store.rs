// Time series store - lazy per-resolution loading with an append-only cache
use crate::application::errors::{StoreError, StoreResult};
use crate::application::resource_fetcher::ResourceFetcher;
use crate::application::series_parser::{parse_series, DEFAULT_DELIMITER};
use crate::domain::resolution::{ChartKind, Resolution};
use crate::domain::series::{Aggregate, Sample, SeriesEntry};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Owns the resolution → resource mapping and the memoized parsed series.
///
/// Each resolution is fetched and parsed on first `load` and kept for the
/// lifetime of the store. Entries are never replaced or evicted. Concurrent
/// loads of the same uncached resolution may each fetch; the first to finish
/// wins the slot and the others return that entry.
pub struct TimeSeriesStore {
    fetcher: Arc<dyn ResourceFetcher>,
    sources: HashMap<Resolution, String>,
    delimiter: char,
    cache: RwLock<HashMap<Resolution, Arc<SeriesEntry>>>,
}

impl TimeSeriesStore {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, sources: HashMap<Resolution, String>) -> Self {
        Self {
            fetcher,
            sources,
            delimiter: DEFAULT_DELIMITER,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub async fn load(&self, resolution: Resolution) -> StoreResult<Arc<SeriesEntry>> {
        if let Some(entry) = self.cached(resolution).await {
            return Ok(entry);
        }

        let locator = self
            .sources
            .get(&resolution)
            .ok_or(StoreError::MissingMapping(resolution))?;

        tracing::debug!("Fetching {} series from {}", resolution, locator);
        let raw = self.fetcher.fetch_text(locator).await?;
        let samples = parse_series(&raw, self.delimiter);
        let entry = Arc::new(SeriesEntry::new(resolution, locator.clone(), samples));

        tracing::info!(
            "Loaded {} series: {} samples, total {:.1} kWh",
            resolution,
            entry.len(),
            entry.aggregate.total
        );

        let mut cache = self.cache.write().await;
        Ok(cache.entry(resolution).or_insert(entry).clone())
    }

    /// Load every mapped resolution concurrently. Failures are logged and
    /// skipped; returns how many resolutions ended up cached.
    pub async fn preload_all(&self) -> usize {
        let jobs = self.enabled_resolutions().into_iter().map(move |resolution| async move {
            match self.load(resolution).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Preload of {} failed: {}", resolution, e);
                    false
                }
            }
        });

        futures::future::join_all(jobs)
            .await
            .into_iter()
            .filter(|loaded| *loaded)
            .count()
    }

    pub async fn cached(&self, resolution: Resolution) -> Option<Arc<SeriesEntry>> {
        self.cache.read().await.get(&resolution).cloned()
    }

    pub fn window<'a>(entry: &'a SeriesEntry, resolution: Resolution) -> &'a [Sample] {
        entry.window(resolution)
    }

    pub fn aggregate(samples: &[Sample]) -> Aggregate {
        Aggregate::of(samples)
    }

    pub fn is_enabled(&self, resolution: Resolution) -> bool {
        self.sources.contains_key(&resolution)
    }

    /// Mapped resolutions in canonical order
    pub fn enabled_resolutions(&self) -> Vec<Resolution> {
        Resolution::ALL
            .into_iter()
            .filter(|r| self.is_enabled(*r))
            .collect()
    }

    pub fn locator(&self, resolution: Resolution) -> Option<&str> {
        self.sources.get(&resolution).map(String::as_str)
    }

    pub fn default_chart_kind(&self, resolution: Resolution) -> ChartKind {
        resolution.default_chart_kind()
    }

    pub fn default_view_points(&self, resolution: Resolution) -> usize {
        resolution.default_view_points()
    }
}
