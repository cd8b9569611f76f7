//! GitHub README presence check.

use crate::github::error::GitHubError;
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;

/// Report whether the repository has a README on its default branch.
///
/// A 404 from the readme endpoint means no README; any other failure is
/// returned to the caller.
pub(crate) fn check_readme(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
) -> AsyncTask<Result<bool, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());

    AsyncTask::spawn_async(async move {
        match inner.repos(&owner, &repo).get_readme().send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let e = GitHubError::from(e);
                if e.is_not_found() { Ok(false) } else { Err(e) }
            }
        }
    })
}
