// Resolution domain model - granularity buckets of the solar series
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of a production series. Each resolution is backed by its own
/// source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

/// How a series is drawn by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

impl Resolution {
    /// Canonical order, finest first.
    pub const ALL: [Resolution; 5] = [
        Resolution::Minutes,
        Resolution::Hours,
        Resolution::Days,
        Resolution::Weeks,
        Resolution::Months,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Resolution::Minutes => "minutes",
            Resolution::Hours => "hours",
            Resolution::Days => "days",
            Resolution::Weeks => "weeks",
            Resolution::Months => "months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Minutes => "Minute",
            Resolution::Hours => "Hour",
            Resolution::Days => "Day",
            Resolution::Weeks => "Week",
            Resolution::Months => "Month",
        }
    }

    pub fn default_chart_kind(&self) -> ChartKind {
        match self {
            Resolution::Minutes | Resolution::Hours | Resolution::Days => ChartKind::Line,
            Resolution::Weeks | Resolution::Months => ChartKind::Bar,
        }
    }

    /// Number of most recent samples shown by default
    pub fn default_view_points(&self) -> usize {
        match self {
            Resolution::Minutes => 720, // 12 hours
            Resolution::Hours => 168,   // 1 week
            Resolution::Days => 90,
            Resolution::Weeks => 52,
            Resolution::Months => 36,
        }
    }

    /// Length of the "last points" list in the detail panel
    pub fn detail_points(&self) -> usize {
        match self {
            Resolution::Weeks | Resolution::Months => 12,
            _ => 10,
        }
    }

    /// strftime pattern for axis and list labels
    pub fn label_format(&self) -> &'static str {
        match self {
            Resolution::Minutes => "%m/%d %H:%M",
            Resolution::Hours => "%m/%d %H:00",
            Resolution::Days | Resolution::Weeks => "%b %d, %Y",
            Resolution::Months => "%b %Y",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolution '{0}'")]
pub struct UnknownResolution(pub String);

impl FromStr for Resolution {
    type Err = UnknownResolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownResolution(s.to_string()))
    }
}

impl ChartKind {
    pub fn title_suffix(&self) -> &'static str {
        match self {
            ChartKind::Line => "Graph",
            ChartKind::Bar => "Column",
        }
    }
}
