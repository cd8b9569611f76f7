//! GitHub API operations module
//!
//! Read-only organization listing and README probing used to harvest the
//! catalog, built on the octocrab library.

pub mod client;
pub mod error;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};

// GitHub API operations (internal)
pub(crate) mod check_readme;
pub(crate) mod list_org_repositories;
