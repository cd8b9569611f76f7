//! Repository catalog enrichment and eligibility engine
//!
//! Turns raw repository metadata into a curated corpus: derived tags, a
//! bounded quality score and a featured decision per record, followed by
//! corpus-wide validation and statistics.

pub mod config;
pub mod corpus;
pub mod enrich;
pub mod export;
pub mod featured;
pub mod harvest;
pub(crate) mod helpers;
pub mod orgs;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod stats;
pub mod tags;
pub mod types;
pub mod validate;

pub use config::{CatalogConfig, EngineConfig, HarvestConfig, ScoringConfig, TaggingConfig};
pub use corpus::{Corpus, CorpusEntry, normalize_featured_values};
pub use enrich::{EnrichSummary, Enricher};
pub use export::{LIST_DELIMITER, export_csv, write_csv};
pub use featured::{FeaturedPolicy, FeaturedShape, assess_checklist, assess_tiered};
pub use harvest::{HarvestOutcome, Harvester, RepositorySource};
pub use orgs::{DEFAULT_ORGANIZATIONS, organization_display_name};
pub use report::{FeaturedSummary, SummaryReport};
pub use rules::{KeywordRule, RuleTables};
pub use scoring::{DemoScorer, QualityScorer, ScoreBreakdown, StarWeighting};
pub use stats::{CorpusStatistics, CountEntry};
pub use tags::{combine_tags, generate_tags};
pub use types::{
    CatalogError, CatalogResult, Criterion, Featured, FeaturedVerdict, License, LicenseInfo,
    Owner, RepositoryRecord, Visibility,
};
pub use validate::{ENHANCED_FIELDS, REQUIRED_FIELDS, ValidationReport, validate, validate_corpus};
