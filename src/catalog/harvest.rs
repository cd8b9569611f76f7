//! Organization harvesting: fetch, filter, enrich and sort.

use futures::stream::{self, StreamExt};
use log::{error, info, warn};

use crate::catalog::config::HarvestConfig;
use crate::catalog::corpus::Corpus;
use crate::catalog::enrich::Enricher;
use crate::catalog::types::{CatalogResult, RepositoryRecord, Visibility};
use crate::github::{GitHubClient, GitHubError, GitHubResult};
use crate::runtime::AsyncTask;

/// Source of organization repositories
pub trait RepositorySource: Send + Sync + 'static {
    fn organization_repositories(
        &self,
        org: &str,
        page_size: u8,
    ) -> AsyncTask<GitHubResult<Vec<RepositoryRecord>>>;

    fn readme_exists(&self, owner: &str, repo: &str) -> AsyncTask<GitHubResult<bool>>;
}

impl RepositorySource for GitHubClient {
    fn organization_repositories(
        &self,
        org: &str,
        page_size: u8,
    ) -> AsyncTask<GitHubResult<Vec<RepositoryRecord>>> {
        let listing = self.list_org_repositories(org, page_size);

        AsyncTask::spawn_async(async move {
            let repos = listing
                .await
                .map_err(|e| GitHubError::Cancelled(e.to_string()))??;

            let records: Vec<RepositoryRecord> = repos
                .iter()
                .filter_map(|repo| match RepositoryRecord::from_github(repo) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Skipping repository {}: {e}", repo.name);
                        None
                    }
                })
                .collect();
            Ok::<_, GitHubError>(records)
        })
    }

    fn readme_exists(&self, owner: &str, repo: &str) -> AsyncTask<GitHubResult<bool>> {
        self.check_readme(owner, repo)
    }
}

/// Result of a harvest run
#[derive(Debug, Clone, Default)]
pub struct HarvestOutcome {
    pub corpus: Corpus,
    pub failed_organizations: Vec<String>,
}

impl HarvestOutcome {
    /// The harvested corpus, or [`crate::catalog::CatalogError::EmptyCorpus`] when no
    /// organization yielded a repository.
    pub fn into_corpus(self) -> CatalogResult<Corpus> {
        self.corpus.ensure_records("no repositories fetched")?;
        Ok(self.corpus)
    }
}

/// Builds a fresh, enriched corpus from every configured organization.
pub struct Harvester<S> {
    source: S,
    config: HarvestConfig,
    enricher: Enricher,
}

impl<S: RepositorySource> Harvester<S> {
    pub fn new(source: S, config: HarvestConfig, enricher: Enricher) -> Self {
        Self {
            source,
            config,
            enricher,
        }
    }

    /// Runs the harvest. A failing organization is logged and skipped; the
    /// remaining organizations are still processed.
    pub async fn run(&self) -> HarvestOutcome {
        let mut outcome = HarvestOutcome::default();
        info!(
            "Harvesting repositories from {} organizations",
            self.config.organizations.len()
        );

        for org in &self.config.organizations {
            let fetched = match self
                .source
                .organization_repositories(org, self.config.page_size)
                .await
            {
                Ok(Ok(records)) => records,
                Ok(Err(e)) => {
                    error!("Failed to process organization {org}: {e}");
                    outcome.failed_organizations.push(org.clone());
                    continue;
                }
                Err(e) => {
                    error!("Listing task for organization {org} was dropped: {e}");
                    outcome.failed_organizations.push(org.clone());
                    continue;
                }
            };

            let fetched_count = fetched.len();
            let mut records: Vec<RepositoryRecord> =
                fetched.into_iter().filter(|r| self.is_wanted(r)).collect();

            if self.config.probe_readme {
                self.probe_readmes(&mut records).await;
            }

            let mut eligible = 0;
            for mut record in records.drain(..) {
                self.enricher.enrich(&mut record);
                if record.featured.as_ref().is_some_and(|f| f.is_featured()) {
                    eligible += 1;
                }
                outcome.corpus.push(record);
            }
            info!(
                "{org}: {fetched_count} fetched, {eligible} featured after filtering"
            );
        }

        outcome.corpus.sort();

        let records: Vec<&RepositoryRecord> = outcome.corpus.records().collect();
        let featured = records
            .iter()
            .filter(|r| r.featured.as_ref().is_some_and(|f| f.is_featured()))
            .count();
        let average = if records.is_empty() {
            0.0
        } else {
            records
                .iter()
                .map(|r| f64::from(r.quality_score.unwrap_or(0)))
                .sum::<f64>()
                / records.len() as f64
        };
        info!("Total repositories fetched and enhanced: {}", records.len());
        info!("Featured repositories: {featured}");
        info!("Average quality score: {average:.1}");

        outcome
    }

    fn is_wanted(&self, record: &RepositoryRecord) -> bool {
        let visibility = record.visibility.unwrap_or(Visibility::Public);
        self.config.visibilities.contains(&visibility)
            && !(self.config.exclude_archived && record.archived)
    }

    /// Fills `has_readme` for records that do not carry it yet. Failed
    /// probes leave the field unset.
    async fn probe_readmes(&self, records: &mut [RepositoryRecord]) {
        let targets: Vec<(usize, String, String)> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_readme.is_none())
            .filter_map(|(index, r)| {
                Some((index, r.owner_login()?.to_string(), r.name.clone()?))
            })
            .collect();

        let results: Vec<(usize, String, GitHubResult<bool>)> = stream::iter(targets)
            .map(|(index, owner, name)| {
                let probe = self.source.readme_exists(&owner, &name);
                async move {
                    let result = probe
                        .await
                        .unwrap_or_else(|e| Err(GitHubError::Cancelled(e.to_string())));
                    (index, format!("{owner}/{name}"), result)
                }
            })
            .buffer_unordered(self.config.readme_concurrency)
            .collect()
            .await;

        for (index, full_name, result) in results {
            match result {
                Ok(exists) => records[index].has_readme = Some(exists),
                Err(e) => warn!("README check failed for {full_name}: {e}"),
            }
        }
    }
}
