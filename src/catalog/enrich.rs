//! Per-record enrichment pipeline: tags, quality score, featured verdict.

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::catalog::config::EngineConfig;
use crate::catalog::corpus::Corpus;
use crate::catalog::scoring::QualityScorer;
use crate::catalog::tags::{combine_tags, generate_tags};
use crate::catalog::types::RepositoryRecord;

/// Counts from one corpus enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub enriched: usize,
    pub skipped: usize,
    pub featured: usize,
}

/// Enrichment engine.
///
/// Holds no per-record state, so one instance can enrich records in any
/// order or from several threads. All recency signals are measured against
/// `reference_time`.
#[derive(Debug, Clone)]
pub struct Enricher {
    config: EngineConfig,
    scorer: QualityScorer,
    reference_time: DateTime<Utc>,
}

impl Enricher {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let scorer = QualityScorer::new(&config.scoring);
        Self {
            config,
            scorer,
            reference_time: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = reference_time;
        self
    }

    #[must_use]
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Recomputes every derived field of `record` from scratch.
    ///
    /// Previously derived values are overwritten, never merged, so enriching
    /// twice with the same reference time gives the same result.
    pub fn enrich(&self, record: &mut RepositoryRecord) {
        let now = self.reference_time;

        let generated = generate_tags(record, &self.config);
        record.all_tags = Some(combine_tags(&record.topics, &generated));
        record.generated_tags = Some(generated);

        let score = self.scorer.score(record, now);
        record.quality_score = Some(score);
        record.featured = Some(self.config.featured_policy.evaluate(record, score, now));

        debug!(
            "Enriched {}: quality {score}, featured {}",
            record.display_name(),
            record.featured.as_ref().is_some_and(|f| f.is_featured())
        );
    }

    /// Enriched copy of `record`.
    #[must_use]
    pub fn enriched(&self, record: &RepositoryRecord) -> RepositoryRecord {
        let mut copy = record.clone();
        self.enrich(&mut copy);
        copy
    }

    /// Enriches every typed record, then sorts the corpus. Raw entries are
    /// left as they are.
    pub fn enrich_corpus(&self, corpus: &mut Corpus) -> EnrichSummary {
        let mut summary = EnrichSummary {
            skipped: corpus.len() - corpus.records().count(),
            ..EnrichSummary::default()
        };

        for record in corpus.records_mut() {
            self.enrich(record);
            summary.enriched += 1;
            if record.featured.as_ref().is_some_and(|f| f.is_featured()) {
                summary.featured += 1;
            }
        }
        corpus.sort();

        info!(
            "Enriched {} records ({} featured, {} skipped)",
            summary.enriched, summary.featured, summary.skipped
        );
        summary
    }
}
