//! Corpus validation
//!
//! Every finding is collected into one [`ValidationReport`]; the pass never
//! stops at the first problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::corpus::Corpus;
use crate::catalog::stats::CorpusStatistics;
use crate::catalog::types::CatalogResult;

/// Fields whose absence invalidates the corpus
pub const REQUIRED_FIELDS: [&str; 5] = ["id", "name", "full_name", "html_url", "owner"];

/// Fields written by the enrichment engine; absence is only a warning
pub const ENHANCED_FIELDS: [&str; 4] = ["generated_tags", "all_tags", "quality_score", "featured"];

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub statistics: CorpusStatistics,
}

/// Validates the JSON form of a corpus.
///
/// `quality_score` is accepted anywhere in `[0, 100]`, a wider range than the
/// scorer emits, so values edited outside the engine are caught only when
/// they leave that range. A structured `featured` verdict is reported as an
/// error: boolean consumers need [`Corpus::normalize_featured`] first.
#[must_use]
pub fn validate(entries: &[Value], now: DateTime<Utc>) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let label = entry
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| format!("Repository {index}"), str::to_string);

        let Some(fields) = entry.as_object() else {
            errors.push(format!("{label}: Entry is not an object"));
            continue;
        };

        for field in REQUIRED_FIELDS {
            if !fields.contains_key(field) {
                errors.push(format!("{label}: Missing required field '{field}'"));
            }
        }

        for field in ENHANCED_FIELDS {
            if !fields.contains_key(field) {
                warnings.push(format!("{label}: Missing enhanced field '{field}'"));
            }
        }

        match fields.get("quality_score") {
            None | Some(Value::Null) => {}
            Some(score) => {
                let in_range = score
                    .as_f64()
                    .is_some_and(|s| (0.0..=100.0).contains(&s));
                if !in_range {
                    errors.push(format!("{label}: Invalid quality_score '{score}'"));
                }
            }
        }

        match fields.get("featured") {
            None | Some(Value::Null) | Some(Value::Bool(_)) => {}
            Some(featured) => {
                errors.push(format!("{label}: Invalid featured status '{featured}'"));
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        statistics: CorpusStatistics::compute(entries, now),
    }
}

/// Validates a typed corpus through its JSON form.
pub fn validate_corpus(corpus: &Corpus, now: DateTime<Utc>) -> CatalogResult<ValidationReport> {
    Ok(validate(&corpus.to_values()?, now))
}
