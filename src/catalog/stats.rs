//! Distributional statistics over a corpus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::catalog::helpers::{days_since, round1};

const RECENT_DAYS: i64 = 30;

/// One histogram bucket
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

/// Corpus statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CorpusStatistics {
    pub total_repositories: usize,
    pub featured_repositories: usize,
    pub featured_percentage: f64,
    pub average_quality_score: f64,
    pub recently_active: usize,
    /// Descending by count, ties by name
    pub languages: Vec<CountEntry>,
    /// Descending by count, ties by name
    pub organizations: Vec<CountEntry>,
}

impl CorpusStatistics {
    /// Computes statistics over every entry, whether or not it is valid.
    ///
    /// A missing quality score counts as 0 toward the average. A record
    /// counts as featured when `featured` is `true` or a verdict with
    /// `eligible: true`.
    #[must_use]
    pub fn compute(entries: &[Value], now: DateTime<Utc>) -> Self {
        let total = entries.len();
        if total == 0 {
            return Self::default();
        }

        let mut featured = 0;
        let mut quality_sum = 0.0;
        let mut recently_active = 0;
        let mut languages: HashMap<String, usize> = HashMap::new();
        let mut organizations: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            if is_featured(entry.get("featured")) {
                featured += 1;
            }

            quality_sum += entry
                .get("quality_score")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);

            if days_since(entry.get("pushed_at").and_then(Value::as_str), now)
                .is_some_and(|days| days <= RECENT_DAYS)
            {
                recently_active += 1;
            }

            if let Some(language) = non_empty_str(entry.get("language")) {
                *languages.entry(language.to_string()).or_default() += 1;
            }

            if let Some(org) = non_empty_str(entry.get("owner").and_then(|o| o.get("login"))) {
                *organizations.entry(org.to_string()).or_default() += 1;
            }
        }

        Self {
            total_repositories: total,
            featured_repositories: featured,
            featured_percentage: round1(featured as f64 / total as f64 * 100.0),
            average_quality_score: round1(quality_sum / total as f64),
            recently_active,
            languages: histogram(languages),
            organizations: histogram(organizations),
        }
    }
}

pub(crate) fn is_featured(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Object(verdict)) => verdict
            .get("eligible")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        _ => false,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn histogram(counts: HashMap<String, usize>) -> Vec<CountEntry> {
    let mut buckets: Vec<CountEntry> = counts
        .into_iter()
        .map(|(name, count)| CountEntry { name, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    buckets
}
