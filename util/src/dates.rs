//! Calendar-day helpers shared by the recorder, reports and query parsing.

use chrono::{DateTime, NaiveDate, Utc};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day (UTC) an instant falls on.
pub fn day_of(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT).ok()
}
