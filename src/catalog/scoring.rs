//! Quality scoring for repository records

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::config::ScoringConfig;
use crate::catalog::helpers::days_since;
use crate::catalog::types::RepositoryRecord;

pub const BASE_SCORE: u32 = 50;
pub const MIN_SCORE: u32 = 30;
pub const MAX_SCORE: u32 = 100;

const STAR_CAP: u32 = 20;

/// Points awarded per star before the star cap applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarWeighting {
    /// 3 points per star
    #[default]
    Standard,
    /// 5 points per star
    Simple,
}

impl StarWeighting {
    #[inline]
    #[must_use]
    pub const fn points_per_star(&self) -> u32 {
        match self {
            Self::Standard => 3,
            Self::Simple => 5,
        }
    }
}

/// Per-signal contributions. Each one is already capped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub stars: u32,
    pub recency: u32,
    pub readme: u32,
    pub description: u32,
    pub language: u32,
    pub topics: u32,
    pub size: u32,
    pub license: u32,
}

impl ScoreBreakdown {
    /// Base score plus all contributions, clamped to `[MIN_SCORE, MAX_SCORE]`.
    #[must_use]
    pub fn total(&self) -> u32 {
        let sum = BASE_SCORE
            + self.stars
            + self.recency
            + self.readme
            + self.description
            + self.language
            + self.topics
            + self.size
            + self.license;
        sum.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Deterministic quality scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer {
    weighting: StarWeighting,
}

impl QualityScorer {
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            weighting: config.star_weighting,
        }
    }

    #[must_use]
    pub fn score(&self, record: &RepositoryRecord, now: DateTime<Utc>) -> u32 {
        self.breakdown(record, now).total()
    }

    #[must_use]
    pub fn breakdown(&self, record: &RepositoryRecord, now: DateTime<Utc>) -> ScoreBreakdown {
        let stars = record
            .stargazers_count
            .saturating_mul(self.weighting.points_per_star())
            .min(STAR_CAP);

        // Unparseable or missing timestamps carry no recency signal
        let recency = match days_since(record.pushed_at.as_deref(), now) {
            Some(days) if days < 30 => 15,
            Some(days) if days < 90 => 10,
            Some(days) if days < 365 => 5,
            _ => 0,
        };

        let description_len = record
            .description
            .as_deref()
            .map_or(0, |d| d.chars().count());
        let description = if description_len > 50 {
            10
        } else if description_len > 20 {
            5
        } else {
            0
        };

        let size = if record.size > 1000 {
            10
        } else if record.size > 100 {
            5
        } else {
            0
        };

        ScoreBreakdown {
            stars,
            recency,
            readme: if record.has_readme == Some(true) { 5 } else { 0 },
            description,
            language: if record.language().is_some() { 5 } else { 0 },
            topics: if record.topics.is_empty() { 0 } else { 5 },
            size,
            license: if record.has_license() { 5 } else { 0 },
        }
    }
}

/// Seeded scorer for demonstrations.
///
/// Applies the simpler weighting with a jitter of -5..=10 points and clamps to
/// `[30, 95]`. Not used by the enrichment pipeline; two scorers built from the
/// same seed produce the same sequence of scores.
#[derive(Debug, Clone)]
pub struct DemoScorer {
    rng: StdRng,
}

impl DemoScorer {
    const DEMO_MAX: i64 = 95;

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn score(&mut self, record: &RepositoryRecord) -> u32 {
        let mut score = i64::from(BASE_SCORE);
        score += i64::from(record.stargazers_count.saturating_mul(5).min(STAR_CAP));
        if record.pushed_at.is_some() {
            score += 10;
        }
        if record
            .description
            .as_deref()
            .is_some_and(|d| d.chars().count() > 20)
        {
            score += 15;
        }
        if record.language().is_some() {
            score += 10;
        }
        if record.size > 100 {
            score += 10;
        }
        score += self.rng.random_range(-5..=10);

        score.clamp(i64::from(MIN_SCORE), Self::DEMO_MAX) as u32
    }
}
