//! Ordering and truncation of loaded feed items.
//!
//! The sort key and the rendered `pubDate` share one fallback rule
//! (missing or unparsable dates resolve to the build time), implemented
//! once in [`resolve_date`] so the two call sites cannot drift apart.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::loader::FeedItem;

/// Resolves a raw date string to the effective publication instant.
///
/// Accepts RFC 3339, RFC 2822, naive `YYYY-MM-DDTHH:MM:SS` /
/// `YYYY-MM-DD HH:MM:SS` datetimes (interpreted as UTC), and bare
/// `YYYY-MM-DD` dates (midnight UTC). Anything else, or `None`, resolves
/// to `now`, the single processing time captured at the start of the
/// run. Used for both the sort key and the rendered `pubDate`.
pub fn resolve_date(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return now;
    };
    match parse_date(raw) {
        Some(date) => date,
        None => {
            tracing::debug!(date = %raw, "Unparsable date, falling back to build time");
            now
        }
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    None
}

/// Sorts items newest first and caps the result at `limit`.
///
/// The sort is stable, so items with equal (or equally unparsable)
/// dates keep their input order. Fields are never touched; whole
/// records are reordered or dropped.
pub fn sort_and_truncate(
    items: Vec<FeedItem>,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<FeedItem> {
    let mut keyed: Vec<(DateTime<Utc>, FeedItem)> = items
        .into_iter()
        .map(|item| (resolve_date(item.date.as_deref(), now), item))
        .collect();

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(limit);

    keyed.into_iter().map(|(_, item)| item).collect()
}
