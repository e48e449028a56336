//! The hosting-API seam

use crate::types::{NewPullRequest, PullRequest, RepoSlug};
use crate::Result;

/// Operations the typofix workflow needs from the code host.
///
/// Repository names without an owner refer to the authenticated user's
/// account (the forks); [`RepoSlug`]s name arbitrary repositories.
pub trait HostingApi {
    /// Login of the authenticated account.
    fn login(&self) -> Result<String>;

    /// Whether the authenticated account already has a repository `name`.
    fn is_forked(&self, name: &str) -> Result<bool>;

    /// Fork `upstream` into the authenticated account.
    fn fork(&self, upstream: &RepoSlug) -> Result<()>;

    fn is_archived(&self, repo: &RepoSlug) -> Result<bool>;

    /// Whether the fork `name` accepts issues.
    fn issues_enabled(&self, name: &str) -> Result<bool>;

    /// Follow parent links from the fork `name` to the top-most repository.
    fn upstream_root(&self, name: &str) -> Result<RepoSlug>;

    /// Open an issue and return its number.
    fn create_issue(&self, repo: &RepoSlug, title: &str, body: &str) -> Result<u64>;

    fn create_pull_request(&self, repo: &RepoSlug, request: &NewPullRequest) -> Result<PullRequest>;

    /// URL to clone the fork `name` from.
    fn clone_url(&self, name: &str) -> Result<String>;
}
