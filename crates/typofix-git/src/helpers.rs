//! Shared git2 helper functions
//!
//! Free functions over an open [`Repository`]; [`crate::GitVcs`] wraps them
//! behind the [`crate::VersionControl`] trait.

use std::path::Path;

use git2::build::RepoBuilder;
use git2::{
    Commit, Config, Cred, CredentialType, DiffFormat, ErrorCode, FetchOptions, PushOptions,
    RemoteCallbacks, Repository, Tree,
};

use crate::{Error, Result};

/// Credential attempts before libgit2 is told to give up.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

/// Tree of the commit HEAD points at, or `None` on an unborn branch.
fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Render the staged changes (HEAD tree against the index) as unified diff
/// text, the same shape `git diff --staged` prints.
pub fn staged_diff(repo: &Repository) -> Result<String> {
    let tree = head_tree(repo)?;
    let index = repo.index()?;
    let diff = repo.diff_tree_to_index(tree.as_ref(), Some(&index), None)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());
        match line.origin() {
            origin @ ('+' | '-' | ' ') => {
                text.push(origin);
                text.push_str(&content);
            }
            // File and hunk headers already carry their full text
            _ => text.push_str(&content),
        }
        true
    })?;

    Ok(text)
}

/// Commit the current index onto HEAD with the given message.
///
/// The message is cleaned the way `git commit -F` cleans it (trailing
/// whitespace and surplus blank lines removed). Returns the new commit id.
pub fn commit_index(repo: &Repository, message: &str) -> Result<git2::Oid> {
    let mut index = repo.index()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let parent = head_commit(repo)?;

    if parent.as_ref().is_some_and(|p| p.tree_id() == tree_id) {
        return Err(Error::NothingToCommit {
            path: workdir_or_gitdir(repo).to_path_buf(),
        });
    }

    let signature = repo.signature()?;
    let message = git2::message_prettify(message, None)?;
    let parents: Vec<&Commit<'_>> = parent.iter().collect();

    let oid = repo.commit(Some("HEAD"), &signature, &signature, &message, &tree, &parents)?;
    tracing::debug!(commit = %oid, "created commit from staged changes");
    Ok(oid)
}

/// Get the current branch name.
///
/// Detached HEAD is an error: the pull request base has to be a branch.
pub fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo.head()?;

    if head.is_branch() {
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    } else {
        Err(Error::DetachedHead {
            path: workdir_or_gitdir(repo).to_path_buf(),
        })
    }
}

/// Push `local_branch` to `remote` under the name `remote_branch`.
///
/// Equivalent to `git push <remote> <local_branch>:<remote_branch>`.
pub fn push(
    repo: &Repository,
    remote: &str,
    local_branch: &str,
    remote_branch: &str,
) -> Result<()> {
    let mut remote_handle = repo.find_remote(remote).map_err(|_| Error::RemoteNotFound {
        name: remote.to_string(),
    })?;

    let config = repo.config()?;
    let mut callbacks = credential_callbacks(&config);
    callbacks.push_update_reference(|reference, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "{reference} rejected: {message}"
        ))),
        None => Ok(()),
    });

    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{local_branch}:refs/heads/{remote_branch}");
    tracing::debug!(remote, %refspec, "pushing");
    remote_handle
        .push(&[&refspec], Some(&mut options))
        .map_err(|e| Error::PushFailed {
            message: e.message().to_string(),
        })?;

    Ok(())
}

/// Clone `url` into `dest`.
pub fn clone(url: &str, dest: &Path) -> Result<Repository> {
    let config = Config::open_default()?;
    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(credential_callbacks(&config));

    tracing::debug!(url, dest = %dest.display(), "cloning");
    let repo = RepoBuilder::new().fetch_options(fetch).clone(url, dest)?;
    Ok(repo)
}

/// Callbacks answering credential requests from the ssh agent or the
/// configured git credential helper.
fn credential_callbacks(config: &Config) -> RemoteCallbacks<'_> {
    let mut attempts = 0;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str(&format!(
                "no usable credentials for {url}"
            )));
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return Cred::credential_helper(config, url, username);
        }
        Cred::default()
    });
    callbacks
}

fn workdir_or_gitdir(repo: &Repository) -> &Path {
    repo.workdir().unwrap_or_else(|| repo.path())
}
