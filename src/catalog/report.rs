//! Summary report exported alongside the corpus

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::catalog::corpus::Corpus;
use crate::catalog::featured::{FeaturedPolicy, FeaturedShape};
use crate::catalog::orgs::organization_display_name;
use crate::catalog::stats::is_featured;
use crate::catalog::types::{CatalogError, CatalogResult};
use crate::catalog::validate::{ValidationReport, validate};
use crate::catalog::CorpusStatistics;

const FEATURED_LIMIT: usize = 10;
const TAG_PREVIEW: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeaturedSummary {
    pub name: String,
    pub organization: String,
    pub quality_score: u32,
    pub url: String,
    pub tags: Vec<String>,
}

/// Run summary for downstream display
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    /// Policy this run enriched with; `None` when the corpus was only read
    pub featured_policy: Option<FeaturedPolicy>,
    /// Shape found in the corpus; `None` when no record carries `featured`
    pub featured_shape: Option<FeaturedShape>,
    pub statistics: CorpusStatistics,
    pub validation: ValidationReport,
    pub featured_repositories: Vec<FeaturedSummary>,
}

impl SummaryReport {
    pub fn build(
        corpus: &Corpus,
        policy: Option<FeaturedPolicy>,
        now: DateTime<Utc>,
    ) -> CatalogResult<Self> {
        Self::from_values(&corpus.to_values()?, policy, now)
    }

    /// Builds the report from corpus JSON exactly as loaded, so `null`
    /// values and stale derived fields are validated as written.
    pub fn from_values(
        entries: &[Value],
        policy: Option<FeaturedPolicy>,
        now: DateTime<Utc>,
    ) -> CatalogResult<Self> {
        if entries.is_empty() {
            return Err(CatalogError::EmptyCorpus(
                "no repositories to report on".to_string(),
            ));
        }

        let validation = validate(entries, now);
        let featured_repositories = entries
            .iter()
            .filter(|entry| is_featured(entry.get("featured")))
            .take(FEATURED_LIMIT)
            .map(featured_summary)
            .collect();

        Ok(Self {
            generated_at: now,
            featured_policy: policy,
            featured_shape: FeaturedShape::detect(entries),
            statistics: validation.statistics.clone(),
            validation,
            featured_repositories,
        })
    }

    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)
            .map_err(|e| CatalogError::io(path, e))?;
        info!("Summary report exported to {}", path.display());
        Ok(())
    }
}

fn featured_summary(entry: &Value) -> FeaturedSummary {
    let text = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let owner = entry
        .get("owner")
        .and_then(|owner| owner.get("login"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    FeaturedSummary {
        name: text("name"),
        organization: organization_display_name(owner),
        quality_score: entry
            .get("quality_score")
            .and_then(Value::as_u64)
            .and_then(|score| u32::try_from(score).ok())
            .unwrap_or(0),
        url: text("html_url"),
        tags: entry
            .get("all_tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .take(TAG_PREVIEW)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
