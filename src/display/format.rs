//! Display formatting of column values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SIZE_SUFFIXES: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// en-US numeric date and time, e.g. `5/11/2000, 12:00:00 AM`.
const DATE_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format a byte count for display.
///
/// Counts below 1024 are shown as whole bytes (`512 B`). Larger counts are
/// scaled to the largest unit up to TB that keeps the value at or above 1 and
/// shown with `fractional_digits` decimals (`19.53 KB`). Negative counts
/// format as the empty string.
pub fn bytes_to_string(bytes: i64, fractional_digits: usize) -> String {
    if bytes < 0 {
        return String::new();
    }
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut suffix = SIZE_SUFFIXES[0];
    for candidate in SIZE_SUFFIXES {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        suffix = candidate;
    }
    format!("{:.*} {}", fractional_digits, value, suffix)
}

/// Format an ISO-8601 timestamp as an en-US date and time.
///
/// Timestamps with an offset are shown in that offset's local time; those
/// without are taken as-is. A bare date is shown at midnight. Anything that
/// does not parse is returned unchanged.
pub fn format_date_time(raw: &str) -> String {
    match parse_date_time(raw.trim()) {
        Some(parsed) => parsed.format(DATE_TIME_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
