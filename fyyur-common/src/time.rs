//! Timestamp utilities
//!
//! Show start times are naive UTC timestamps. "Now" is always taken at query
//! time, never stored.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Storage and display format of a start time (`2019-05-21 21:30:00`)
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted from the show form, tried in order
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Get current UTC timestamp
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Years whose stored text sorts in time order (four digits, no sign)
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse a submitted start time
///
/// RFC 3339 input carrying an offset is converted to UTC. Years outside
/// 0000-9999 are rejected.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Validation("start_time is required".to_string()));
    }

    let parsed = ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).naive_utc())
        })
        .ok_or_else(|| {
            Error::Validation(format!("start_time {:?} is not a valid date and time", raw))
        })?;

    if !STORABLE_YEARS.contains(&parsed.year()) {
        return Err(Error::Validation(format!(
            "start_time {:?} must fall between years 0000 and 9999",
            raw
        )));
    }
    Ok(parsed)
}

/// Text form of a start time, as handed to pages
pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// Display styles for timestamps on pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

/// Human-readable rendering of a start time
pub fn format_datetime(start_time: &NaiveDateTime, style: DisplayFormat) -> String {
    let pattern = match style {
        DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    start_time.format(pattern).to_string()
}
