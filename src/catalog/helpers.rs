//! Helper utility functions

use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashSet;

/// Parses a persisted timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`) and offset-less ISO 8601, which
/// is read as UTC. Anything else yields `None`.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Whole days elapsed between `raw` and `now`. Negative for future timestamps.
pub(crate) fn days_since(raw: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    raw.and_then(parse_timestamp)
        .map(|then| (now - then).num_days())
}

/// Insertion-ordered set of tags (duplicates ignored, order preserved).
#[derive(Debug, Default)]
pub(crate) struct TagSet {
    seen: HashSet<String>,
    tags: Vec<String>,
}

impl TagSet {
    pub fn insert(&mut self, tag: &str) {
        if self.seen.insert(tag.to_string()) {
            self.tags.push(tag.to_string());
        }
    }

    pub fn extend<'a, I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for tag in tags {
            self.insert(tag);
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

/// Rounds to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
