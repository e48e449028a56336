//! The version-control seam used by the typofix workflow

use std::path::Path;

use git2::Repository;

use crate::{Result, helpers};

/// Version-control operations the typofix workflow depends on.
///
/// Every method takes the repository working directory explicitly; there is
/// no ambient "current directory".
pub trait VersionControl {
    /// Unified diff of the changes currently staged for commit.
    fn staged_diff(&self, repo_dir: &Path) -> Result<String>;

    /// Commit the staged changes using the contents of `message_file` as the
    /// commit message. Returns the abbreviated commit id.
    fn commit_with_message_file(&self, repo_dir: &Path, message_file: &Path) -> Result<String>;

    /// Push `local_branch` to `remote` as `remote_branch`.
    fn push(
        &self,
        repo_dir: &Path,
        remote: &str,
        local_branch: &str,
        remote_branch: &str,
    ) -> Result<()>;

    /// Name of the branch currently checked out.
    fn current_branch(&self, repo_dir: &Path) -> Result<String>;

    /// Clone `url` into `dest`. Only used when acquiring new repositories.
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`VersionControl`] backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitVcs;

impl GitVcs {
    pub fn new() -> Self {
        Self
    }
}

impl VersionControl for GitVcs {
    fn staged_diff(&self, repo_dir: &Path) -> Result<String> {
        let repo = Repository::open(repo_dir)?;
        helpers::staged_diff(&repo)
    }

    fn commit_with_message_file(&self, repo_dir: &Path, message_file: &Path) -> Result<String> {
        let repo = Repository::open(repo_dir)?;
        let path = if message_file.is_absolute() {
            message_file.to_path_buf()
        } else {
            repo_dir.join(message_file)
        };
        let message = typofix_fs::io::read_text(&path)?;
        let oid = helpers::commit_index(&repo, &message)?;
        let mut short = oid.to_string();
        short.truncate(7);
        Ok(short)
    }

    fn push(
        &self,
        repo_dir: &Path,
        remote: &str,
        local_branch: &str,
        remote_branch: &str,
    ) -> Result<()> {
        let repo = Repository::open(repo_dir)?;
        helpers::push(&repo, remote, local_branch, remote_branch)
    }

    fn current_branch(&self, repo_dir: &Path) -> Result<String> {
        let repo = Repository::open(repo_dir)?;
        helpers::current_branch(&repo)
    }

    fn clone_repository(&self, url: &str, dest: &Path) -> Result<()> {
        helpers::clone(url, dest).map(|_| ())
    }
}
