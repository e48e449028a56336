//! GitHub REST implementation of [`HostingApi`]

use std::cell::OnceCell;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::HostingApi;
use crate::types::{NewPullRequest, PullRequest, RepoSlug};
use crate::{Error, Result};

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Parent links followed before giving up on a fork chain.
const MAX_FORK_DEPTH: usize = 16;

const USER_AGENT_VALUE: &str = concat!("typofix/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepoRef {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    full_name: String,
    #[serde(default)]
    archived: bool,
    #[serde(default = "default_true")]
    has_issues: bool,
    #[serde(default)]
    parent: Option<RepoRef>,
    #[serde(default)]
    ssh_url: Option<String>,
    #[serde(default)]
    clone_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
}

fn default_true() -> bool {
    true
}

/// Blocking GitHub API client authenticated with a personal access token.
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
    login: OnceCell<String>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a client for `api_url` using `token`.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            login: OnceCell::new(),
        })
    }

    /// Create a client reading the token from the environment variable `var`.
    pub fn from_env(api_url: impl Into<String>, var: &str) -> Result<Self> {
        let token = std::env::var(var)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::MissingToken {
                var: var.to_string(),
            })?;
        Self::new(api_url, token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request)?.json()?)
    }

    /// Fetch a repository, mapping 404 to `None`.
    fn find_repo(&self, slug: &str) -> Result<Option<RepoResponse>> {
        let request = self.http.get(self.url(&format!("/repos/{slug}")));
        match self.send_json(request) {
            Ok(repo) => Ok(Some(repo)),
            Err(Error::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn get_repo(&self, slug: &str) -> Result<RepoResponse> {
        self.find_repo(slug)?.ok_or_else(|| Error::RepositoryNotFound {
            slug: slug.to_string(),
        })
    }

    fn own_repo(&self, name: &str) -> Result<RepoResponse> {
        let login = self.login()?;
        self.get_repo(&format!("{login}/{name}"))
    }
}

impl HostingApi for GitHubClient {
    fn login(&self) -> Result<String> {
        if let Some(login) = self.login.get() {
            return Ok(login.clone());
        }
        let user: UserResponse = self.send_json(self.http.get(self.url("/user")))?;
        tracing::debug!(login = %user.login, "authenticated");
        Ok(self.login.get_or_init(|| user.login).clone())
    }

    fn is_forked(&self, name: &str) -> Result<bool> {
        let login = self.login()?;
        Ok(self.find_repo(&format!("{login}/{name}"))?.is_some())
    }

    fn fork(&self, upstream: &RepoSlug) -> Result<()> {
        tracing::info!(%upstream, "forking");
        let request = self
            .http
            .post(self.url(&format!("/repos/{upstream}/forks")))
            .json(&json!({}));
        self.send(request)?;
        Ok(())
    }

    fn is_archived(&self, repo: &RepoSlug) -> Result<bool> {
        Ok(self.get_repo(&repo.to_string())?.archived)
    }

    fn issues_enabled(&self, name: &str) -> Result<bool> {
        Ok(self.own_repo(name)?.has_issues)
    }

    fn upstream_root(&self, name: &str) -> Result<RepoSlug> {
        let mut repo = self.own_repo(name)?;
        let mut hops = 0;
        while let Some(parent) = repo.parent.take() {
            if hops == MAX_FORK_DEPTH {
                return Err(Error::ForkChainTooDeep {
                    fork: name.to_string(),
                    depth: MAX_FORK_DEPTH,
                });
            }
            repo = self.get_repo(&parent.full_name)?;
            hops += 1;
        }
        tracing::debug!(fork = name, root = %repo.full_name, "resolved upstream root");
        repo.full_name.parse()
    }

    fn create_issue(&self, repo: &RepoSlug, title: &str, body: &str) -> Result<u64> {
        let request = self
            .http
            .post(self.url(&format!("/repos/{repo}/issues")))
            .json(&json!({ "title": title, "body": body }));
        let issue: IssueResponse = self.send_json(request)?;
        tracing::info!(%repo, number = issue.number, "created issue");
        Ok(issue.number)
    }

    fn create_pull_request(&self, repo: &RepoSlug, request: &NewPullRequest) -> Result<PullRequest> {
        let http_request = self
            .http
            .post(self.url(&format!("/repos/{repo}/pulls")))
            .json(request);
        let pull: PullResponse = self.send_json(http_request)?;
        tracing::info!(%repo, number = pull.number, "created pull request");
        Ok(PullRequest {
            number: pull.number,
            url: pull.html_url,
        })
    }

    fn clone_url(&self, name: &str) -> Result<String> {
        let repo = self.own_repo(name)?;
        repo.ssh_url
            .or(repo.clone_url)
            .ok_or_else(|| Error::RepositoryNotFound {
                slug: repo.full_name,
            })
    }
}
