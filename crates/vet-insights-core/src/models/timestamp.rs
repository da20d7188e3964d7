//! Timestamp parsing for text-stored dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, SQLite `datetime()` output (`YYYY-MM-DD HH:MM:SS`, UTC)
/// and bare dates (`YYYY-MM-DD`, midnight UTC). Returns `None` for anything
/// else so callers can treat malformed values as non-matches.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
