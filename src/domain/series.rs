// Series domain models - samples, aggregates and cached series entries
use super::resolution::Resolution;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One production reading: energy produced (kWh) in the bucket starting at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Summary statistics over a run of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub total: f64,
    pub peak: f64,
    pub average: f64,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl Aggregate {
    /// Sum, maximum, mean and bounds of `samples`. An empty slice yields zeros
    /// and no bounds.
    pub fn of(samples: &[Sample]) -> Self {
        let total: f64 = samples.iter().map(|s| s.value).sum();
        let (peak, average) = if samples.is_empty() {
            (0.0, 0.0)
        } else {
            let peak = samples
                .iter()
                .map(|s| s.value)
                .fold(f64::NEG_INFINITY, f64::max);
            (peak, total / samples.len() as f64)
        };

        Self {
            total,
            peak,
            average,
            start: samples.first().map(|s| s.timestamp),
            end: samples.last().map(|s| s.timestamp),
        }
    }
}

/// A fully parsed series for one resolution, as held by the store cache.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesEntry {
    pub resolution: Resolution,
    pub source: String,
    pub samples: Vec<Sample>,
    #[serde(flatten)]
    pub aggregate: Aggregate,
}

impl SeriesEntry {
    pub fn new(resolution: Resolution, source: String, samples: Vec<Sample>) -> Self {
        let aggregate = Aggregate::of(&samples);
        Self {
            resolution,
            source,
            samples,
            aggregate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The most recent `resolution.default_view_points()` samples.
    pub fn window(&self, resolution: Resolution) -> &[Sample] {
        let n = resolution.default_view_points();
        let skip = self.samples.len().saturating_sub(n);
        &self.samples[skip..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn series(resolution: Resolution, len: usize) -> SeriesEntry {
        let samples = (0..len)
            .map(|i| Sample::new(day(1) + chrono::Duration::hours(i as i64), i as f64))
            .collect();
        SeriesEntry::new(resolution, "test.csv".to_string(), samples)
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = Aggregate::of(&[]);
        assert_eq!(agg.total, 0.0);
        assert_eq!(agg.peak, 0.0);
        assert_eq!(agg.average, 0.0);
        assert_eq!(agg.start, None);
        assert_eq!(agg.end, None);
    }

    #[test]
    fn test_aggregate_values() {
        let samples = vec![
            Sample::new(day(1), 170.0),
            Sample::new(day(2), 180.0),
            Sample::new(day(3), 20.0),
        ];
        let agg = Aggregate::of(&samples);
        assert_eq!(agg.total, 370.0);
        assert_eq!(agg.peak, 180.0);
        assert!((agg.average - 370.0 / 3.0).abs() < 1e-9);
        assert_eq!(agg.start, Some(day(1)));
        assert_eq!(agg.end, Some(day(3)));
    }

    #[test]
    fn test_peak_of_negative_values() {
        let samples = vec![Sample::new(day(1), -5.0), Sample::new(day(2), -2.0)];
        assert_eq!(Aggregate::of(&samples).peak, -2.0);
    }

    #[test]
    fn test_window_is_suffix_of_default_size() {
        let entry = series(Resolution::Months, 50);
        let window = entry.window(Resolution::Months);
        assert_eq!(window.len(), 36);
        assert_eq!(window.first().unwrap().value, 14.0);
        assert_eq!(window.last(), entry.samples.last());
    }

    #[test]
    fn test_window_shorter_series_returns_all() {
        let entry = series(Resolution::Weeks, 10);
        assert_eq!(entry.window(Resolution::Weeks), entry.samples.as_slice());

        let empty = series(Resolution::Days, 0);
        assert!(empty.window(Resolution::Days).is_empty());
    }

    #[test]
    fn test_entry_carries_aggregate() {
        let entry = series(Resolution::Hours, 4);
        assert_eq!(entry.aggregate.total, 6.0);
        assert_eq!(entry.aggregate.peak, 3.0);
        assert_eq!(entry.len(), 4);
    }
}
