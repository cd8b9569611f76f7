//! Type definitions for the repository catalog

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised by catalog I/O and configuration.
///
/// Validation findings are never errors; they are reported through
/// [`ValidationReport`](super::ValidationReport).
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Corpus is empty: {0}")]
    EmptyCorpus(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Repository visibility as reported by the source system
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

impl Visibility {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Private => "private",
        }
    }
}

/// Owning user or organization. Referenced, not owned, by the record.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    #[serde(default, deserialize_with = "null_as_default")]
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// License as persisted: either the GitHub license object or a bare name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum License {
    Detailed(LicenseInfo),
    Name(String),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LicenseInfo {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl License {
    /// Human readable license name, if one is recorded.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let name = match self {
            Self::Detailed(info) => info
                .name
                .as_deref()
                .or(info.spdx_id.as_deref())
                .or(info.key.as_deref()),
            Self::Name(name) => Some(name.as_str()),
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }

    #[inline]
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.display_name().is_some()
    }
}

/// One criterion of the checklist featured policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Name,
    Owner,
    Language,
    Description,
    Tags,
    Readme,
    RecentActivity,
    License,
}

impl Criterion {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Owner => "owner",
            Self::Language => "language",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Readme => "readme",
            Self::RecentActivity => "recent_activity",
            Self::License => "license",
        }
    }
}

/// Structured verdict produced by the checklist featured policy
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeaturedVerdict {
    pub eligible: bool,
    pub score: u32,
    pub criteria_met: Vec<Criterion>,
    pub missing_criteria: Vec<Criterion>,
}

/// Persisted `featured` field. Its shape depends on the policy of the run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Featured {
    Flag(bool),
    Verdict(FeaturedVerdict),
}

impl Featured {
    #[must_use]
    pub fn is_featured(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Verdict(verdict) => verdict.eligible,
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Option<&FeaturedVerdict> {
        match self {
            Self::Flag(_) => None,
            Self::Verdict(verdict) => Some(verdict),
        }
    }
}

/// Repository metadata plus the fields derived by the enrichment engine.
///
/// Identity fields are optional so that an incomplete record can still be
/// enriched; the validator reports their absence. Fields this type does not
/// know about are kept in `extra` and written back unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RepositoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub license: Option<License>,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forks_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_issues_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_readme: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<Featured>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepositoryRecord {
    /// Name used in log lines and validator messages.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.full_name.as_deref())
            .unwrap_or("unknown")
    }

    #[must_use]
    pub fn owner_login(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .map(|o| o.login.as_str())
            .filter(|login| !login.is_empty())
    }

    /// Language with blank values treated as absent.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    #[must_use]
    pub fn has_license(&self) -> bool {
        self.license.as_ref().is_some_and(License::is_present)
    }

    /// Converts an octocrab repository model into a catalog record, keeping
    /// only the fields the catalog persists.
    pub fn from_github(repo: &octocrab::models::Repository) -> CatalogResult<Self> {
        const KEPT_EXTRA: [&str; 2] = ["watchers_count", "private"];

        let mut record: Self = serde_json::from_value(serde_json::to_value(repo)?)?;
        record.extra.retain(|key, value| {
            KEPT_EXTRA.contains(&key.as_str()) && !value.is_null()
        });
        Ok(record)
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
