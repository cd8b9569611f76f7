//! Configuration for catalog runs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::featured::FeaturedPolicy;
use crate::catalog::orgs::DEFAULT_ORGANIZATIONS;
use crate::catalog::rules::RuleTables;
use crate::catalog::scoring::StarWeighting;
use crate::catalog::types::{CatalogError, CatalogResult, Visibility};

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub engine: EngineConfig,
    pub harvest: HarvestConfig,
}

impl CatalogConfig {
    /// Loads and validates a TOML configuration file. Omitted keys keep
    /// their defaults.
    pub fn from_toml_file(path: &Path) -> CatalogResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> CatalogResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        self.engine.validate()?;
        self.harvest.validate()
    }
}

/// Configuration for the enrichment engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tagging: TaggingConfig,
    pub scoring: ScoringConfig,
    pub featured_policy: FeaturedPolicy,
    pub rules: RuleTables,
}

impl EngineConfig {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.tagging.max_tags == 0 {
            return Err(CatalogError::ConfigError(
                "tagging.max_tags must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    /// Upper bound on generated tags per record
    pub max_tags: usize,
    /// Related tags contributed by each matching keyword rule
    pub related_tags_per_rule: usize,
    /// Size (KB) above which a repository is tagged `comprehensive`
    pub large_size_kb: u64,
    /// Marker tags added to every record
    pub domain_tags: Vec<String>,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            max_tags: 8,
            related_tags_per_rule: 2,
            large_size_kb: 1000,
            domain_tags: vec!["nhs-wales".to_string(), "healthcare".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub star_weighting: StarWeighting,
}

/// Configuration for harvesting organization repositories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub organizations: Vec<String>,
    pub visibilities: Vec<Visibility>,
    pub exclude_archived: bool,
    pub page_size: u8,
    pub probe_readme: bool,
    pub readme_concurrency: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            organizations: DEFAULT_ORGANIZATIONS.iter().map(|s| (*s).to_string()).collect(),
            visibilities: vec![Visibility::Public, Visibility::Internal],
            exclude_archived: true,
            page_size: 100, // GitHub API max
            probe_readme: true,
            readme_concurrency: 8,
        }
    }
}

impl HarvestConfig {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.page_size == 0 || self.page_size > 100 {
            return Err(CatalogError::ConfigError(format!(
                "harvest.page_size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        if self.readme_concurrency == 0 {
            return Err(CatalogError::ConfigError(
                "harvest.readme_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
