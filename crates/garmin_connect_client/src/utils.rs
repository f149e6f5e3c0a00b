//! Utility functions for timestamp parsing and duration formatting.

use chrono::NaiveDateTime;

/// Parse a local start time as sent by the service.
///
/// Accepts:
/// - `YYYY-MM-DD HH:MM:SS` (the activity list format)
/// - `YYYY-MM-DDTHH:MM:SS`, optionally with fractional seconds
/// - RFC3339 datetime, reduced to its naive local form
pub fn parse_local_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ndt);
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    None
}

/// Render a duration in seconds as `H:MM:SS`. Negative and non-finite input renders as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
