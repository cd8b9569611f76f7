//! GitHub organization repository listing operation.

use crate::github::error::GitHubError;
use crate::runtime::AsyncTask;
use log::{info, warn};
use octocrab::{Octocrab, models::Repository, params};
use std::sync::Arc;

/// List every repository of an organization, most recently updated first.
///
/// Pages are requested until an empty or short page is returned. An unknown
/// or inaccessible organization yields an empty list rather than an error.
pub(crate) fn list_org_repositories(
    inner: Arc<Octocrab>,
    org: impl Into<String>,
    per_page: u8,
) -> AsyncTask<Result<Vec<Repository>, GitHubError>> {
    let org = org.into();

    AsyncTask::spawn_async(async move {
        let mut repositories = Vec::new();
        let mut page: u32 = 1;

        loop {
            let result = inner
                .orgs(&org)
                .list_repos()
                .repo_type(params::repos::Type::All)
                .sort(params::repos::Sort::Updated)
                .direction(params::Direction::Descending)
                .per_page(per_page)
                .page(page)
                .send()
                .await
                .map_err(GitHubError::from);

            let items = match result {
                Ok(p) => p.items,
                Err(e) if e.is_not_found() => {
                    warn!("Organization {org} not found or no access");
                    break;
                }
                Err(e) => return Err(e),
            };

            let fetched = items.len();
            info!("Fetched page {page} for organization {org}: {fetched} repositories");
            repositories.extend(items);

            if fetched < usize::from(per_page) {
                break;
            }
            page += 1;
        }

        Ok(repositories)
    })
}
