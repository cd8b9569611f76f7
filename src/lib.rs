//! `kodegen_catalog` - repository catalog enrichment via Octocrab
//!
//! This library harvests repository metadata from a set of GitHub
//! organizations and enriches each record with derived tags, a bounded
//! quality score and a featured-eligibility decision. Corpus validation,
//! statistics and CSV export run over the persisted JSON corpus.

// Module declarations
pub mod catalog;
pub mod github;
pub mod runtime;

// Re-export runtime types
pub use runtime::AsyncTask;

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

// Re-export catalog types for public API
pub use catalog::{
    CatalogConfig,
    CatalogError,
    CatalogResult,
    Corpus,
    CorpusEntry,
    CorpusStatistics,
    Criterion,
    DemoScorer,
    EngineConfig,
    EnrichSummary,
    Enricher,
    Featured,
    FeaturedPolicy,
    FeaturedShape,
    FeaturedVerdict,
    HarvestConfig,
    HarvestOutcome,
    Harvester,
    QualityScorer,
    RepositoryRecord,
    RepositorySource,
    SummaryReport,
    ValidationReport,
    // Engine operations
    combine_tags,
    export_csv,
    generate_tags,
    validate,
    validate_corpus,
};
