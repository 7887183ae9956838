//! Relative time phrasing ("3 days ago").
//!
//! Thresholds follow the widely used timeago scale, so the phrase produced
//! here matches what the embedded activation script shows in the browser.
//! Timestamps are read the way `new Date(..)` reads them: a date-time without
//! an offset is local time, a bare date is midnight UTC.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601-like timestamp.
///
/// Accepts RFC 3339 (with offset), naive date-times (taken as local time)
/// and bare dates (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(text, &Local)
}

/// [`parse_timestamp`] with naive date-times read in `zone`.
///
/// A local time skipped by a DST change does not exist and yields `None`;
/// an ambiguous one resolves to the earlier instant.
pub fn parse_timestamp_in<Tz: TimeZone>(text: &str, zone: &Tz) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return zone
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Human phrasing of the distance between `then` and `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let distance_ms = (now - then).num_milliseconds();
    let suffix = if distance_ms < 0 { "from now" } else { "ago" };

    let seconds = distance_ms.unsigned_abs() as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;
    let years = days / 365.0;

    let phrase = if seconds < 45.0 {
        "less than a minute".to_string()
    } else if seconds < 90.0 {
        "about a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes.round())
    } else if minutes < 90.0 {
        "about an hour".to_string()
    } else if hours < 24.0 {
        format!("about {} hours", hours.round())
    } else if hours < 42.0 {
        "a day".to_string()
    } else if days < 30.0 {
        format!("{} days", days.round())
    } else if days < 45.0 {
        "about a month".to_string()
    } else if days < 365.0 {
        format!("{} months", (days / 30.0).round())
    } else if years < 1.5 {
        "about a year".to_string()
    } else {
        format!("{} years", years.round())
    };

    format!("{phrase} {suffix}")
}

/// Relative phrasing for a timestamp string, or `None` if it does not parse.
pub fn relative_time_str(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    parse_timestamp(timestamp).map(|then| relative_time(then, now))
}
