// Series parser - lenient reader for `<value><delimiter><timestamp>` records
use crate::domain::series::Sample;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const DEFAULT_DELIMITER: char = ',';

/// Parse raw resource text into samples sorted by timestamp.
///
/// Each non-empty line is split at the first `delimiter` into a value and a
/// timestamp. Lines that do not yield a finite value and a valid timestamp are
/// skipped. Sorting is stable, so samples sharing a timestamp keep their input
/// order.
pub fn parse_series(raw: &str, delimiter: char) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut dropped = 0usize;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_record(line, delimiter) {
            Some(sample) => samples.push(sample),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(
            "Skipped {} malformed records ({} kept)",
            dropped,
            samples.len()
        );
    }

    samples.sort_by_key(|s| s.timestamp);
    samples
}

fn parse_record(line: &str, delimiter: char) -> Option<Sample> {
    let (value, timestamp) = line.split_once(delimiter)?;

    let value: f64 = value.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(Sample::new(parse_timestamp(timestamp)?, value))
}

/// Parse `HH:MM:SS MM/DD/YY`. The date token may also come first; the two
/// tokens are told apart by their separators.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let mut tokens = s.split_whitespace();
    let (first, second) = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }

    let (time, date) = if first.contains(':') {
        (first, second)
    } else {
        (second, first)
    };

    Some(NaiveDateTime::new(parse_date(date)?, parse_time(time)?))
}

fn parse_time(token: &str) -> Option<NaiveTime> {
    let [hour, minute, second] = split_fields(token, ':')?;
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    let [month, day, year] = split_fields(token, '/')?;
    // Years are always written with two digits
    let year_digits = token.rsplit('/').next()?.len();
    if year_digits > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(expand_year(year)?, month, day)
}

fn split_fields(token: &str, sep: char) -> Option<[u32; 3]> {
    let mut parts = token.split(sep).map(|p| p.parse::<u32>().ok());
    let fields = [parts.next()??, parts.next()??, parts.next()??];
    if parts.next().is_some() {
        return None;
    }
    Some(fields)
}

/// Two-digit years pivot at 69: `00..=69` → 2000s, `70..=99` → 1900s.
pub fn expand_year(yy: u32) -> Option<i32> {
    match yy {
        0..=69 => Some(2000 + yy as i32),
        70..=99 => Some(1900 + yy as i32),
        _ => None,
    }
}
