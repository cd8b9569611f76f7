//! Tests for organization harvesting against an in-memory source.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kodegen_tools_catalog::catalog::{
    CatalogError, FeaturedPolicy, HarvestConfig, Harvester, RepositoryRecord, RepositorySource,
    Visibility,
};
use kodegen_tools_catalog::{AsyncTask, GitHubError, GitHubResult};

use super::fixtures::{enricher, legacy_scripts, named, triage_api};

struct FakeSource {
    organizations: HashMap<String, Vec<RepositoryRecord>>,
    readmes: HashSet<String>,
    probes: Arc<AtomicUsize>,
}

impl RepositorySource for FakeSource {
    fn organization_repositories(
        &self,
        org: &str,
        _page_size: u8,
    ) -> AsyncTask<GitHubResult<Vec<RepositoryRecord>>> {
        let result = self
            .organizations
            .get(org)
            .cloned()
            .ok_or_else(|| GitHubError::Api(format!("organization {org} unavailable")));
        AsyncTask::ready(result)
    }

    fn readme_exists(&self, _owner: &str, repo: &str) -> AsyncTask<GitHubResult<bool>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        AsyncTask::ready(Ok(self.readmes.contains(repo)))
    }
}

fn source() -> (FakeSource, Arc<AtomicUsize>) {
    let mut triage = triage_api();
    triage.has_readme = None;

    let mut archived = named("old-pas-extract", "NHS-Executive", Some("SQL"), 900);
    archived.archived = true;

    let mut private = named("secret-rota", "NHS-Executive", Some("Python"), 3);
    private.visibility = Some(Visibility::Private);

    let mut internal = named("ward-dashboard", "GIGCymru", Some("R"), 3);
    internal.visibility = Some(Visibility::Internal);
    internal.has_readme = Some(false);

    let probes = Arc::new(AtomicUsize::new(0));
    let source = FakeSource {
        organizations: HashMap::from([
            (
                "NHS-Executive".to_string(),
                vec![legacy_scripts(), archived, private, triage],
            ),
            ("GIGCymru".to_string(), vec![internal]),
        ]),
        readmes: HashSet::from(["ED-Triage-API".to_string()]),
        probes: probes.clone(),
    };
    (source, probes)
}

fn config(organizations: &[&str]) -> HarvestConfig {
    HarvestConfig {
        organizations: organizations.iter().map(|o| (*o).to_string()).collect(),
        ..HarvestConfig::default()
    }
}

#[tokio::test]
async fn test_harvest_filters_enriches_and_sorts() {
    let (source, probes) = source();
    let harvester = Harvester::new(
        source,
        config(&["NHS-Executive", "GIGCymru"]),
        enricher(FeaturedPolicy::Tiered),
    );

    let outcome = harvester.run().await;

    assert!(outcome.failed_organizations.is_empty());
    let names: Vec<&str> = outcome.corpus.records().map(|r| r.display_name()).collect();
    assert_eq!(names[0], "ED-Triage-API");
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"ward-dashboard"));
    assert!(names.contains(&"legacy-scripts"));

    // legacy-scripts and ED-Triage-API lack the signal; ward-dashboard has it
    assert_eq!(probes.load(Ordering::SeqCst), 2);

    let triage = outcome.corpus.records().next().unwrap();
    assert_eq!(triage.has_readme, Some(true));
    assert_eq!(triage.quality_score, Some(100));
    assert!(outcome.corpus.records().all(|r| r.all_tags.is_some()));

    let legacy = outcome
        .corpus
        .records()
        .find(|r| r.display_name() == "legacy-scripts")
        .unwrap();
    assert_eq!(legacy.has_readme, Some(false));
}

#[tokio::test]
async fn test_failing_organization_is_skipped() {
    let (source, _) = source();
    let harvester = Harvester::new(
        source,
        config(&["Missing-Org", "GIGCymru"]),
        enricher(FeaturedPolicy::Tiered),
    );

    let outcome = harvester.run().await;

    assert_eq!(outcome.failed_organizations, vec!["Missing-Org"]);
    assert_eq!(outcome.into_corpus().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_harvest_is_an_error() {
    let (source, _) = source();
    let harvester = Harvester::new(
        source,
        config(&["Missing-Org", "Another-Missing-Org"]),
        enricher(FeaturedPolicy::Tiered),
    );

    let outcome = harvester.run().await;

    assert_eq!(outcome.failed_organizations.len(), 2);
    let err = outcome.into_corpus().unwrap_err();
    assert!(matches!(err, CatalogError::EmptyCorpus(_)));
    assert_eq!(err.to_string(), "Corpus is empty: no repositories fetched");
}

#[tokio::test]
async fn test_harvest_without_readme_probe_keeps_archived_when_allowed() {
    let (source, probes) = source();
    let harvest = HarvestConfig {
        probe_readme: false,
        exclude_archived: false,
        visibilities: vec![Visibility::Public, Visibility::Internal, Visibility::Private],
        ..config(&["NHS-Executive"])
    };
    let harvester = Harvester::new(source, harvest, enricher(FeaturedPolicy::Checklist));

    let outcome = harvester.run().await;

    assert_eq!(outcome.corpus.len(), 4);
    assert_eq!(probes.load(Ordering::SeqCst), 0);
    assert!(
        outcome
            .corpus
            .records()
            .all(|r| r.featured.as_ref().is_some_and(|f| f.verdict().is_some()))
    );
    let triage = outcome
        .corpus
        .records()
        .find(|r| r.display_name() == "ED-Triage-API")
        .unwrap();
    assert_eq!(triage.has_readme, None);
}
