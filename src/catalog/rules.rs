//! Keyword and language rule tables used by the tag generator.
//!
//! The tables are plain configuration: the engine never mutates them, so a
//! single instance can be shared by any number of concurrent enrichments.
//! Tests inject smaller tables through [`RuleTables::new`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Maps a keyword found in a repository name or description to related tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Lower-cased on construction and on load
    #[serde(deserialize_with = "lowercase")]
    pub keyword: String,
    pub tags: Vec<String>,
}

impl KeywordRule {
    pub fn new<K, T, I>(keyword: K, tags: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            keyword: keyword.into().to_lowercase(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the keyword occurs in either lower-cased haystack.
    #[must_use]
    pub fn matches(&self, name_lower: &str, description_lower: &str) -> bool {
        !self.keyword.is_empty()
            && (name_lower.contains(&self.keyword) || description_lower.contains(&self.keyword))
    }
}

fn lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|keyword| keyword.to_lowercase())
}

fn lowercase_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let languages = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
    Ok(languages
        .into_iter()
        .map(|(lang, tags)| (lang.to_lowercase(), tags))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    /// Evaluated in order
    pub keywords: Vec<KeywordRule>,
    /// Keyed by lower-cased language name
    #[serde(deserialize_with = "lowercase_keys")]
    pub languages: BTreeMap<String, Vec<String>>,
}

impl RuleTables {
    pub fn new(keywords: Vec<KeywordRule>, languages: BTreeMap<String, Vec<String>>) -> Self {
        let languages = languages
            .into_iter()
            .map(|(lang, tags)| (lang.to_lowercase(), tags))
            .collect();
        Self {
            keywords,
            languages,
        }
    }

    /// Technology tags for a detected language, matched case-insensitively.
    #[must_use]
    pub fn language_tags(&self, language: &str) -> Option<&[String]> {
        self.languages
            .get(&language.trim().to_lowercase())
            .map(Vec::as_slice)
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        let keywords = vec![
            KeywordRule::new("clinical", ["clinical", "patient-care", "medical"]),
            KeywordRule::new("emergency", ["emergency-department", "urgent-care", "triage"]),
            KeywordRule::new("data", ["data-analytics", "healthcare-insights", "reporting"]),
            KeywordRule::new("integration", ["system-integration", "interoperability", "api"]),
            KeywordRule::new("pharmacy", ["pharmacy", "prescriptions", "medications"]),
            KeywordRule::new("dental", ["dental-services", "oral-health"]),
            KeywordRule::new("mental", ["mental-health", "wellbeing", "psychology"]),
            KeywordRule::new("forecast", ["predictive-analytics", "forecasting", "ml"]),
            KeywordRule::new("dashboard", ["visualization", "monitoring", "dashboards"]),
            KeywordRule::new("mobile", ["mobile-health", "digital-health"]),
            KeywordRule::new("security", ["information-governance", "data-security"]),
        ];

        let languages: [(&str, &[&str]); 11] = [
            ("python", &["python", "data-science", "automation"]),
            ("javascript", &["javascript", "web-development", "frontend"]),
            ("typescript", &["typescript", "modern-web", "scalable"]),
            ("java", &["java", "enterprise", "backend"]),
            ("c#", &["csharp", "dotnet", "microsoft-stack"]),
            ("r", &["r", "statistical-analysis", "research"]),
            ("sql", &["database", "data-management", "analytics"]),
            ("html", &["web-interface", "frontend", "user-experience"]),
            ("css", &["styling", "responsive-design", "ui"]),
            ("shell", &["automation", "scripting", "devops"]),
            ("dockerfile", &["containerization", "deployment", "docker"]),
        ];

        Self {
            keywords,
            languages: languages
                .into_iter()
                .map(|(lang, tags)| {
                    (
                        lang.to_string(),
                        tags.iter().map(|t| (*t).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}
