// src/utils/time.rs

//! Timestamp parsing and date labels.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Abbreviated month names as printed in citation access dates.
const ACCESS_MONTHS: [&str; 12] = [
    "Jan.", "Feb.", "Mar.", "Apr.", "May", "June", "July", "Aug.", "Sept.", "Oct.", "Nov.",
    "Dec.",
];

/// Parse a fixture timestamp.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Format an access date as `19 Oct. 2026`.
pub fn access_date(date: NaiveDate) -> String {
    let month = ACCESS_MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Human label for how long ago `then` was, relative to `now`.
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => then.format("%b %-d, %Y").to_string(),
    }
}
