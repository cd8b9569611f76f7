//! Tag generation for a single repository record

use crate::catalog::config::EngineConfig;
use crate::catalog::helpers::TagSet;
use crate::catalog::types::RepositoryRecord;

pub(crate) const COMMUNITY_VALIDATED: &str = "community-validated";
pub(crate) const WELL_DOCUMENTED: &str = "well-documented";
pub(crate) const COMPREHENSIVE: &str = "comprehensive";

/// Derives the tag set for one record.
///
/// Pure function of the record and the configured rule tables. Stale derived
/// fields on the record (`generated_tags`, `all_tags`) are ignored. The result
/// holds at most `tagging.max_tags` entries; which entries survive the cap is
/// not part of the contract.
#[must_use]
pub fn generate_tags(record: &RepositoryRecord, config: &EngineConfig) -> Vec<String> {
    let tagging = &config.tagging;
    let mut tags = TagSet::default();

    tags.extend(&record.topics);

    let name_lower = record.name.as_deref().unwrap_or_default().to_lowercase();
    let description_lower = record
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    for rule in &config.rules.keywords {
        if rule.matches(&name_lower, &description_lower) {
            tags.extend(rule.tags.iter().take(tagging.related_tags_per_rule));
        }
    }

    if let Some(language) = record.language()
        && let Some(language_tags) = config.rules.language_tags(language)
    {
        tags.extend(language_tags);
    }

    tags.extend(&tagging.domain_tags);

    if record.stargazers_count > 0 {
        tags.insert(COMMUNITY_VALIDATED);
    }
    if record.has_readme == Some(true) {
        tags.insert(WELL_DOCUMENTED);
    }
    if record.size > tagging.large_size_kb {
        tags.insert(COMPREHENSIVE);
    }

    let mut tags = tags.into_vec();
    tags.truncate(tagging.max_tags);
    tags
}

/// Union of author topics and generated tags, topics first.
#[must_use]
pub fn combine_tags(topics: &[String], generated: &[String]) -> Vec<String> {
    let mut all = TagSet::default();
    all.extend(topics);
    all.extend(generated);
    all.into_vec()
}
