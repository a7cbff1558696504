//! Lenient date normalization for feed-supplied timestamps
//!
//! The graph feed delivers ISO-8601-ish strings: sometimes a full timestamp,
//! sometimes a bare date, sometimes garbage. Everything normalizes down to a
//! calendar date or nothing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Normalize a raw feed string to a calendar date.
///
/// Accepts an RFC 3339 timestamp (truncated to its date), a naive datetime,
/// or a bare `YYYY-MM-DD` string. Returns `None` for anything else rather
/// than propagating a sentinel.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Pick the primary date for a campaign: first-seen preferred, last-seen as
/// fallback, `None` when neither parses.
pub fn primary_date(first_seen: Option<&str>, last_seen: Option<&str>) -> Option<NaiveDate> {
    first_seen
        .and_then(normalize_date)
        .or_else(|| last_seen.and_then(normalize_date))
}
