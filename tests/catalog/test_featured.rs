//! Tests for both featured-eligibility policies.

use kodegen_tools_catalog::catalog::{
    Criterion, Featured, FeaturedPolicy, FeaturedShape, assess_checklist, assess_tiered,
};
use serde_json::json;

use super::fixtures::{days_ago, enricher, legacy_scripts, reference_time, triage_api};

#[test]
fn test_tiered_score_80_always_featured() {
    let record = legacy_scripts();
    assert!(assess_tiered(&record, 80, reference_time()));
    assert!(assess_tiered(&record, 100, reference_time()));
}

#[test]
fn test_tiered_65_with_old_push_not_featured() {
    let mut record = legacy_scripts();
    record.pushed_at = Some(days_ago(100));
    assert!(!assess_tiered(&record, 65, reference_time()));

    record.pushed_at = Some(days_ago(59));
    assert!(assess_tiered(&record, 65, reference_time()));

    record.pushed_at = Some(days_ago(60));
    assert!(!assess_tiered(&record, 65, reference_time()));
}

#[test]
fn test_tiered_70_needs_stars() {
    let mut record = legacy_scripts();
    assert!(!assess_tiered(&record, 79, reference_time()));

    record.stargazers_count = 1;
    assert!(assess_tiered(&record, 70, reference_time()));
    assert!(!assess_tiered(&record, 69, reference_time()));
}

#[test]
fn test_checklist_complete_record() {
    let record = enricher(FeaturedPolicy::Checklist).enriched(&triage_api());
    let verdict = assess_checklist(&record, reference_time());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 120);
    assert!(verdict.missing_criteria.is_empty());
    assert!(verdict.criteria_met.contains(&Criterion::License));
}

#[test]
fn test_checklist_license_is_bonus_only() {
    let mut record = enricher(FeaturedPolicy::Checklist).enriched(&triage_api());
    record.license = None;
    let verdict = assess_checklist(&record, reference_time());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 115);
    assert!(!verdict.missing_criteria.contains(&Criterion::License));
    assert!(!verdict.criteria_met.contains(&Criterion::License));
}

#[test]
fn test_checklist_requires_name_owner_and_language() {
    let base = enricher(FeaturedPolicy::Checklist).enriched(&triage_api());

    let mut no_name = base.clone();
    no_name.name = None;
    let mut no_owner = base.clone();
    no_owner.owner = None;
    let mut no_language = base.clone();
    no_language.language = None;

    for (record, missing) in [
        (no_name, Criterion::Name),
        (no_owner, Criterion::Owner),
        (no_language, Criterion::Language),
    ] {
        let verdict = assess_checklist(&record, reference_time());
        assert_eq!(verdict.score, 100, "{missing:?}");
        assert!(!verdict.eligible, "{missing:?} absent must block eligibility");
        assert_eq!(verdict.missing_criteria, vec![missing]);
    }
}

#[test]
fn test_checklist_optional_criteria() {
    let mut record = triage_api();
    record.description = Some("  short   ".to_string());
    record.has_readme = None;
    record.updated_at = Some(days_ago(200));

    let verdict = assess_checklist(&record, reference_time());

    // topics only: a single tag
    assert_eq!(
        verdict.missing_criteria,
        vec![
            Criterion::Description,
            Criterion::Tags,
            Criterion::Readme,
            Criterion::RecentActivity
        ]
    );
    assert_eq!(verdict.score, 65);
    assert!(!verdict.eligible);
}

#[test]
fn test_policy_shapes() {
    assert_eq!(FeaturedPolicy::Checklist.shape(), FeaturedShape::Verdict);
    assert_eq!(FeaturedPolicy::Tiered.shape(), FeaturedShape::Boolean);
    assert_eq!(FeaturedPolicy::default(), FeaturedPolicy::Tiered);
    assert_eq!(FeaturedPolicy::Checklist.as_str(), "checklist");

    let record = triage_api();
    assert!(matches!(
        FeaturedPolicy::Checklist.evaluate(&record, 100, reference_time()),
        Featured::Verdict(_)
    ));
    assert_eq!(
        FeaturedPolicy::Tiered.evaluate(&record, 100, reference_time()),
        Featured::Flag(true)
    );
}

#[test]
fn test_featured_field_serialization() {
    let tiered = enricher(FeaturedPolicy::Tiered).enriched(&triage_api());
    let value = serde_json::to_value(&tiered).unwrap();
    assert_eq!(value["featured"], serde_json::json!(true));

    let checklist = enricher(FeaturedPolicy::Checklist).enriched(&triage_api());
    let value = serde_json::to_value(&checklist).unwrap();
    assert_eq!(value["featured"]["eligible"], serde_json::json!(true));
    assert_eq!(value["featured"]["score"], serde_json::json!(120));
    assert_eq!(value["featured"]["missing_criteria"], serde_json::json!([]));

    let restored: kodegen_tools_catalog::catalog::RepositoryRecord =
        serde_json::from_value(value).unwrap();
    assert_eq!(restored.featured, checklist.featured);
}

#[test]
fn test_enriched_records_respect_policy() {
    let featured = enricher(FeaturedPolicy::Tiered).enriched(&triage_api());
    assert_eq!(featured.quality_score, Some(100));
    assert_eq!(featured.featured, Some(Featured::Flag(true)));

    let plain = enricher(FeaturedPolicy::Tiered).enriched(&legacy_scripts());
    assert_eq!(plain.quality_score, Some(50));
    assert_eq!(plain.featured, Some(Featured::Flag(false)));
}

#[test]
fn test_shape_detected_from_entries() {
    let verdict = json!({ "featured": { "eligible": false, "score": 40 } });
    let flag = json!({ "featured": true });
    let unset = json!({ "featured": null });
    let stale = json!({ "featured": "yes" });

    assert_eq!(FeaturedShape::detect(&[]), None);
    assert_eq!(FeaturedShape::detect(&[unset.clone(), stale.clone()]), None);
    assert_eq!(
        FeaturedShape::detect(&[unset.clone(), verdict.clone()]),
        Some(FeaturedShape::Verdict)
    );
    assert_eq!(
        FeaturedShape::detect(&[flag.clone(), stale]),
        Some(FeaturedShape::Boolean)
    );
    assert_eq!(
        FeaturedShape::detect(&[verdict, unset, flag]),
        Some(FeaturedShape::Mixed)
    );
    assert_eq!(FeaturedShape::Mixed.as_str(), "mixed");
}
