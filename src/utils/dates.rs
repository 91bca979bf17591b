//! Calendar-date helpers shared by the derivation engine and aggregators.
//!
//! All dates in the crate are [`NaiveDate`] values: zone-free calendar days,
//! so the same wall-clock day is stable regardless of the host timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

/// Serializes a date as `YYYY-MM-DD`, zero-padded.
pub fn to_date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` or ISO datetime string, never failing.
///
/// Empty or unparseable input degrades to `fallback` so a single malformed
/// record cannot abort a whole derivation run.
pub fn parse_date_safe(input: &str, fallback: NaiveDate) -> NaiveDate {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return datetime.date_naive();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return datetime.date();
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .unwrap_or(fallback)
}

/// Advances a date by `n` days; `n` may be zero or negative.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Returns the number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Shifts a date by whole months, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}
