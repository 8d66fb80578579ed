// File: crates/chart-core/src/date.rs
// Summary: Timestamp formatting for axis and info box titles (UTC, pure functions).

use chrono::{DateTime, Utc};

fn utc(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(timestamp_ms)
}

/// `"Oct 10"`; empty string for timestamps chrono cannot represent.
pub fn mon_date(timestamp_ms: i64) -> String {
    utc(timestamp_ms).map(|d| d.format("%b %-d").to_string()).unwrap_or_default()
}

/// `"Wed, Oct 10"`.
pub fn day_mon_date(timestamp_ms: i64) -> String {
    utc(timestamp_ms).map(|d| d.format("%a, %b %-d").to_string()).unwrap_or_default()
}
