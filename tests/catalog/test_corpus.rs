//! Tests for corpus typing, persistence, ordering and enrichment passes.

use kodegen_tools_catalog::catalog::{
    CatalogError, Corpus, CorpusEntry, EngineConfig, Enricher, Featured, FeaturedPolicy,
    normalize_featured_values, validate_corpus,
};
use serde_json::json;

use super::fixtures::{
    days_ago, enricher, legacy_scripts, named, reference_time, triage_api, triage_api_json,
};

#[test]
fn test_untypeable_entry_kept_raw() {
    let corpus = Corpus::from_values(vec![
        json!({ "name": "broken-entry", "stargazers_count": "many" }),
        triage_api_json(),
    ]);

    assert_eq!(corpus.len(), 2);
    assert!(matches!(corpus.entries()[0], CorpusEntry::Raw(_)));
    assert_eq!(corpus.records().count(), 1);
}

#[test]
fn test_malformed_derived_fields_are_recomputed() {
    let enricher = enricher(FeaturedPolicy::Tiered);
    let fresh = enricher.enriched(&triage_api());

    for (field, stale) in [
        ("quality_score", json!(-5)),
        ("quality_score", json!(72.5)),
        ("featured", json!("yes")),
        ("generated_tags", json!("a;b")),
        ("all_tags", json!(7)),
    ] {
        let mut value = triage_api_json();
        value[field] = stale.clone();
        let mut corpus = Corpus::from_values(vec![value]);

        assert!(
            matches!(corpus.entries()[0], CorpusEntry::Record(_)),
            "{field}={stale} left the entry raw"
        );
        let summary = enricher.enrich_corpus(&mut corpus);
        assert_eq!(summary.enriched, 1);
        assert_eq!(summary.skipped, 0);

        let record = corpus.records().next().unwrap();
        assert_eq!(record.quality_score, Some(100));
        assert_eq!(record.featured, Some(Featured::Flag(true)));
        assert_eq!(record.generated_tags, fresh.generated_tags);
        assert_eq!(record.all_tags, fresh.all_tags);
    }
}

#[test]
fn test_malformed_source_field_keeps_entry_raw() {
    let mut value = triage_api_json();
    value["stargazers_count"] = json!("many");
    value["quality_score"] = json!(-5);

    let corpus = Corpus::from_values(vec![value.clone()]);

    assert_eq!(corpus.entries()[0], CorpusEntry::Raw(value));
}

#[test]
fn test_ensure_records_rejects_empty_corpus() {
    let empty = Corpus::default();
    assert!(matches!(
        empty.ensure_records("nothing loaded"),
        Err(CatalogError::EmptyCorpus(_))
    ));

    let raw_only = Corpus::from_values(vec![json!("not a repository")]);
    assert!(matches!(
        raw_only.ensure_records("nothing typed"),
        Err(CatalogError::EmptyCorpus(_))
    ));

    let corpus = Corpus::from_records(vec![triage_api()]);
    assert!(corpus.ensure_records("harvest").is_ok());
}

#[test]
fn test_raw_entries_pass_through_enrichment() {
    let broken = json!({ "name": "broken-entry", "stargazers_count": "many" });
    let mut corpus = Corpus::from_values(vec![broken.clone(), triage_api_json()]);

    let summary = enricher(FeaturedPolicy::Tiered).enrich_corpus(&mut corpus);

    assert_eq!(summary.enriched, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.featured, 1);
    assert_eq!(corpus.entries()[1], CorpusEntry::Raw(broken));

    let report = validate_corpus(&corpus, reference_time()).unwrap();
    assert!(!report.valid);
    assert!(
        report
            .errors
            .iter()
            .all(|e| e.starts_with("broken-entry: Missing required field"))
    );
    assert_eq!(report.statistics.total_repositories, 2);
}

#[test]
fn test_save_and_load_preserve_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("repositories.json");

    let mut value = triage_api_json();
    value["watchers_count"] = json!(3);
    value["custom_note"] = json!("kept as-is");
    let corpus = Corpus::from_values(vec![value]);
    corpus.save(&path).unwrap();

    let loaded = Corpus::load(&path).unwrap();
    assert_eq!(loaded, corpus);

    let record = loaded.records().next().unwrap();
    assert_eq!(record.extra["custom_note"], json!("kept as-is"));
    assert_eq!(record.extra["watchers_count"], json!(3));

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(on_disk.is_array());
    assert_eq!(on_disk[0]["license"], json!("MIT"));
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Corpus::load(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_sort_by_quality_then_recency() {
    let mut older = named("older", "GIGCymru", Some("R"), 200);
    older.quality_score = Some(70);
    let mut newer = named("newer", "GIGCymru", Some("R"), 2);
    newer.quality_score = Some(70);
    let mut best = named("best", "GIGCymru", Some("R"), 300);
    best.quality_score = Some(90);

    let mut corpus = Corpus::from_records(vec![older, newer, best]);
    corpus.push(CorpusEntry::Raw(json!({ "name": 1 })));
    corpus.sort();

    let names: Vec<&str> = corpus.records().map(|r| r.display_name()).collect();
    assert_eq!(names, vec!["best", "newer", "older"]);
    assert!(matches!(corpus.entries()[3], CorpusEntry::Raw(_)));
}

#[test]
fn test_enrichment_idempotent() {
    let enricher = enricher(FeaturedPolicy::Checklist);

    for record in [triage_api(), legacy_scripts()] {
        let once = enricher.enriched(&record);
        let twice = enricher.enriched(&once);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_stale_derived_fields_recomputed() {
    let enricher = enricher(FeaturedPolicy::Tiered);
    let fresh = enricher.enriched(&triage_api());

    let mut stale = triage_api();
    stale.generated_tags = Some(vec!["stale".to_string()]);
    stale.all_tags = Some(vec!["stale".to_string()]);
    stale.quality_score = Some(5);
    stale.featured = Some(Featured::Flag(false));

    assert_eq!(enricher.enriched(&stale), fresh);
}

#[test]
fn test_enriched_fields_hold_invariants() {
    let enricher = enricher(FeaturedPolicy::Tiered);
    let mut busy = triage_api();
    busy.topics = (0..12).map(|i| format!("topic-{i}")).collect();

    for record in [
        triage_api(),
        legacy_scripts(),
        busy,
        named("mental-health-data", "NHS-Executive", Some("Python"), 45),
    ] {
        let enriched = enricher.enriched(&record);
        let generated = enriched.generated_tags.as_ref().unwrap();
        let all = enriched.all_tags.as_ref().unwrap();

        assert!(generated.len() <= 8);
        for tag in enriched.topics.iter().chain(generated) {
            assert!(all.contains(tag), "{tag} missing from all_tags");
        }
        let score = enriched.quality_score.unwrap();
        assert!((30..=100).contains(&score));
    }
}

#[test]
fn test_reference_time_drives_recency() {
    let record = triage_api();
    let config = EngineConfig::default();

    let now = Enricher::new(config.clone()).with_reference_time(reference_time());
    let later = Enricher::new(config)
        .with_reference_time(reference_time() + chrono::Duration::days(400));

    assert_eq!(now.enriched(&record).quality_score, Some(100));
    // Recency drops from 15 to 0
    assert_eq!(later.enriched(&record).quality_score, Some(94));
    assert_eq!(record.pushed_at.as_deref(), Some(days_ago(10).as_str()));
}

#[test]
fn test_normalize_featured_converts_verdicts() {
    let mut corpus = Corpus::from_records(vec![triage_api(), legacy_scripts()]);
    enricher(FeaturedPolicy::Checklist).enrich_corpus(&mut corpus);

    assert_eq!(corpus.normalize_featured(), 2);
    assert_eq!(corpus.normalize_featured(), 0);

    let flags: Vec<Option<Featured>> = corpus.records().map(|r| r.featured.clone()).collect();
    assert_eq!(
        flags,
        vec![Some(Featured::Flag(true)), Some(Featured::Flag(false))]
    );
}

#[test]
fn test_normalize_featured_values_in_place() {
    let mut values = vec![
        json!({ "name": "a", "featured": { "eligible": true, "score": 95 } }),
        json!({ "name": "b", "featured": false }),
        json!({ "name": "c", "featured": null }),
        json!({ "name": "d" }),
    ];

    assert_eq!(normalize_featured_values(&mut values), 1);

    assert_eq!(values[0]["featured"], json!(true));
    assert_eq!(values[1]["featured"], json!(false));
    assert_eq!(values[2]["featured"], json!(null));
    assert!(values[3].get("featured").is_none());
}
