//! Hosting-API collaborator for typofix
//!
//! [`HostingApi`] is everything the workflow asks of the code host: fork
//! bookkeeping, repository flags, issue and pull request creation, and
//! resolving the root of a fork chain. [`GitHubClient`] implements it over
//! the GitHub REST API with a blocking HTTP client; the workflow is a
//! single-operator, run-to-completion loop, so nothing here is async.

pub mod api;
pub mod error;
pub mod github;
pub mod types;

pub use api::HostingApi;
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use types::{NewPullRequest, PullRequest, RepoSlug};
