//! In-memory [`HostingApi`] that records every write.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use typofix_hosting::{Error, HostingApi, NewPullRequest, PullRequest, RepoSlug, Result};

/// Issue recorded by [`FakeHosting::create_issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedIssue {
    pub repo: RepoSlug,
    pub number: u64,
    pub title: String,
    pub body: String,
}

/// A scripted code host.
///
/// Forks created through [`HostingApi::fork`] become visible to
/// [`HostingApi::is_forked`] immediately.
#[derive(Debug)]
pub struct FakeHosting {
    login: String,
    owned: RefCell<BTreeSet<String>>,
    archived: BTreeSet<RepoSlug>,
    issues_disabled: BTreeSet<String>,
    roots: BTreeMap<String, RepoSlug>,
    clone_urls: BTreeMap<String, String>,
    forked: RefCell<Vec<RepoSlug>>,
    issues: RefCell<Vec<RecordedIssue>>,
    pulls: RefCell<Vec<(RepoSlug, NewPullRequest)>>,
    next_number: Cell<u64>,
}

impl FakeHosting {
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            owned: RefCell::default(),
            archived: BTreeSet::new(),
            issues_disabled: BTreeSet::new(),
            roots: BTreeMap::new(),
            clone_urls: BTreeMap::new(),
            forked: RefCell::default(),
            issues: RefCell::default(),
            pulls: RefCell::default(),
            next_number: Cell::new(1),
        }
    }

    /// The account already owns a repository called `name`.
    pub fn with_existing_fork(self, name: &str) -> Self {
        self.owned.borrow_mut().insert(name.to_string());
        self
    }

    pub fn with_archived(mut self, upstream: RepoSlug) -> Self {
        self.archived.insert(upstream);
        self
    }

    pub fn with_issues_disabled(mut self, name: &str) -> Self {
        self.issues_disabled.insert(name.to_string());
        self
    }

    /// Root repository reported for the fork `name`.
    pub fn with_root(mut self, name: &str, root: RepoSlug) -> Self {
        self.roots.insert(name.to_string(), root);
        self
    }

    pub fn with_clone_url(mut self, name: &str, url: &str) -> Self {
        self.clone_urls.insert(name.to_string(), url.to_string());
        self
    }

    /// Upstreams passed to `fork`, in call order.
    pub fn forked(&self) -> Vec<RepoSlug> {
        self.forked.borrow().clone()
    }

    pub fn issues(&self) -> Vec<RecordedIssue> {
        self.issues.borrow().clone()
    }

    pub fn pull_requests(&self) -> Vec<(RepoSlug, NewPullRequest)> {
        self.pulls.borrow().clone()
    }

    fn next(&self) -> u64 {
        let number = self.next_number.get();
        self.next_number.set(number + 1);
        number
    }

    fn not_found(&self, name: &str) -> Error {
        Error::RepositoryNotFound {
            slug: format!("{}/{}", self.login, name),
        }
    }
}

impl HostingApi for FakeHosting {
    fn login(&self) -> Result<String> {
        Ok(self.login.clone())
    }

    fn is_forked(&self, name: &str) -> Result<bool> {
        Ok(self.owned.borrow().contains(name))
    }

    fn fork(&self, upstream: &RepoSlug) -> Result<()> {
        self.owned.borrow_mut().insert(upstream.name.clone());
        self.forked.borrow_mut().push(upstream.clone());
        Ok(())
    }

    fn is_archived(&self, repo: &RepoSlug) -> Result<bool> {
        Ok(self.archived.contains(repo))
    }

    fn issues_enabled(&self, name: &str) -> Result<bool> {
        Ok(!self.issues_disabled.contains(name))
    }

    fn upstream_root(&self, name: &str) -> Result<RepoSlug> {
        self.roots.get(name).cloned().ok_or_else(|| self.not_found(name))
    }

    fn create_issue(&self, repo: &RepoSlug, title: &str, body: &str) -> Result<u64> {
        let number = self.next();
        self.issues.borrow_mut().push(RecordedIssue {
            repo: repo.clone(),
            number,
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(number)
    }

    fn create_pull_request(&self, repo: &RepoSlug, request: &NewPullRequest) -> Result<PullRequest> {
        let number = self.next();
        self.pulls.borrow_mut().push((repo.clone(), request.clone()));
        Ok(PullRequest {
            number,
            url: format!("https://example.test/{repo}/pull/{number}"),
        })
    }

    fn clone_url(&self, name: &str) -> Result<String> {
        self.clone_urls.get(name).cloned().ok_or_else(|| self.not_found(name))
    }
}
