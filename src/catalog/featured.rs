//! Featured-eligibility policies
//!
//! Two policies coexist in persisted corpora and both stay supported:
//!
//! - [`FeaturedPolicy::Checklist`] awards points for required and optional
//!   fields and emits a structured [`FeaturedVerdict`].
//! - [`FeaturedPolicy::Tiered`] combines the quality score with engagement
//!   tiers and emits a plain boolean.
//!
//! The run configuration selects one; [`FeaturedPolicy::shape`] names the
//! shape it writes. A corpus on disk may come from either policy, so reports
//! describe it with [`FeaturedShape::detect`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::helpers::{days_since, parse_timestamp};
use crate::catalog::types::{Criterion, Featured, FeaturedVerdict, RepositoryRecord};

const CHECKLIST_THRESHOLD: u32 = 80;
const RECENT_ACTIVITY_DAYS: i64 = 180;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedPolicy {
    /// Required fields plus a scored checklist (structured verdict)
    Checklist,
    /// Quality score and engagement tiers (boolean)
    #[default]
    Tiered,
}

/// Shape of the persisted `featured` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedShape {
    Boolean,
    Verdict,
    /// Both shapes occur in one corpus
    Mixed,
}

impl FeaturedShape {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Verdict => "verdict",
            Self::Mixed => "mixed",
        }
    }

    /// Shape of the `featured` values present in `entries`, or `None` when
    /// no entry carries a boolean or verdict.
    #[must_use]
    pub fn detect(entries: &[Value]) -> Option<Self> {
        let mut detected = None;
        for featured in entries.iter().filter_map(|entry| entry.get("featured")) {
            let shape = match featured {
                Value::Bool(_) => Self::Boolean,
                Value::Object(_) => Self::Verdict,
                _ => continue,
            };
            match detected {
                None => detected = Some(shape),
                Some(seen) if seen != shape => return Some(Self::Mixed),
                Some(_) => {}
            }
        }
        detected
    }
}

impl FeaturedPolicy {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checklist => "checklist",
            Self::Tiered => "tiered",
        }
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> FeaturedShape {
        match self {
            Self::Checklist => FeaturedShape::Verdict,
            Self::Tiered => FeaturedShape::Boolean,
        }
    }

    /// Evaluates `record` whose derived tags and quality score are current.
    #[must_use]
    pub fn evaluate(
        &self,
        record: &RepositoryRecord,
        quality_score: u32,
        now: DateTime<Utc>,
    ) -> Featured {
        match self {
            Self::Checklist => Featured::Verdict(assess_checklist(record, now)),
            Self::Tiered => Featured::Flag(assess_tiered(record, quality_score, now)),
        }
    }
}

/// Scored checklist.
///
/// Eligible when the score reaches 80 and name, owner and language are all
/// present. The license criterion is a bonus and is never reported missing.
#[must_use]
pub fn assess_checklist(record: &RepositoryRecord, now: DateTime<Utc>) -> FeaturedVerdict {
    let mut score = 0;
    let mut criteria_met = Vec::new();
    let mut missing_criteria = Vec::new();

    let mut check = |criterion: Criterion, points: u32, passed: bool| {
        if passed {
            score += points;
            criteria_met.push(criterion);
        } else if criterion != Criterion::License {
            missing_criteria.push(criterion);
        }
    };

    let has_name = record.name.as_deref().is_some_and(|n| !n.trim().is_empty());
    let has_owner = record.owner_login().is_some();
    let has_language = record.language().is_some();

    check(Criterion::Name, 20, has_name);
    check(Criterion::Owner, 20, has_owner);
    check(Criterion::Language, 20, has_language);
    check(
        Criterion::Description,
        15,
        record
            .description
            .as_deref()
            .is_some_and(|d| d.trim().chars().count() > 10),
    );

    let tag_count =
        record.topics.len() + record.generated_tags.as_ref().map_or(0, Vec::len);
    check(Criterion::Tags, 15, tag_count >= 2);
    check(Criterion::Readme, 10, record.has_readme == Some(true));

    let cutoff = now - chrono::Duration::days(RECENT_ACTIVITY_DAYS);
    let recently_updated = record
        .updated_at
        .as_deref()
        .and_then(parse_timestamp)
        .is_some_and(|updated| updated > cutoff);
    check(Criterion::RecentActivity, 15, recently_updated);
    check(Criterion::License, 5, record.has_license());

    let eligible = score >= CHECKLIST_THRESHOLD && has_name && has_owner && has_language;

    FeaturedVerdict {
        eligible,
        score,
        criteria_met,
        missing_criteria,
    }
}

/// Engagement tiers over an already computed quality score.
#[must_use]
pub fn assess_tiered(record: &RepositoryRecord, quality_score: u32, now: DateTime<Utc>) -> bool {
    if quality_score >= 80 {
        return true;
    }
    if quality_score >= 70 && record.stargazers_count > 0 {
        return true;
    }
    quality_score >= 65
        && days_since(record.pushed_at.as_deref(), now).is_some_and(|days| days < 60)
}
