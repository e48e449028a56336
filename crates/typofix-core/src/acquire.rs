//! Repository acquisition, registration and removal

use std::fs;
use std::path::{Path, PathBuf};

use typofix_git::VersionControl;
use typofix_hosting::{HostingApi, RepoSlug};

use crate::model::RepositoryRecord;
use crate::spelling::{SpellChecker, write_report};
use crate::store::RepositoryStore;
use crate::workflow::Sentinel;
use crate::{Error, Result};

const DEFAULT_REPORT: &str = "spelling.txt";

/// Register the existing checkout `target/dir_name` under `dir_name`.
pub fn register_existing(
    store: &RepositoryStore,
    target: &Path,
    dir_name: &str,
) -> Result<RepositoryRecord> {
    let path = target.join(dir_name);
    if !path.is_dir() {
        return Err(Error::NotADirectory { path });
    }
    let record = RepositoryRecord::new(dir_name, path);
    store.register(&record)?;
    Ok(record)
}

/// Names of the directories directly under `target`, sorted.
pub fn list_target_directories(target: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(target).map_err(|e| typofix_fs::Error::io(target, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Forget `name` and, when `delete_dir` is set, delete its checkout.
///
/// Returns the record that was known, if any. A pending change without a
/// known repository is still removed.
pub fn remove_repository(
    store: &RepositoryStore,
    name: &str,
    delete_dir: bool,
) -> Result<Option<RepositoryRecord>> {
    let record = store.repository(name)?;
    store.remove(name)?;

    match &record {
        Some(record) if delete_dir && record.local_path.is_dir() => {
            fs::remove_dir_all(&record.local_path)
                .map_err(|e| typofix_fs::Error::io(&record.local_path, e))?;
            tracing::info!(path = %record.local_path.display(), "deleted checkout");
        }
        Some(record) if delete_dir => {
            tracing::warn!(path = %record.local_path.display(), "checkout already gone");
        }
        _ => {}
    }
    Ok(record)
}

/// Forks, clones and spell-checks the next usable candidate.
pub struct Acquisition<'a> {
    hosting: &'a dyn HostingApi,
    vcs: &'a dyn VersionControl,
    spelling: &'a dyn SpellChecker,
    store: &'a RepositoryStore,
    target: PathBuf,
    report_name: String,
}

impl<'a> Acquisition<'a> {
    pub fn new(
        hosting: &'a dyn HostingApi,
        vcs: &'a dyn VersionControl,
        spelling: &'a dyn SpellChecker,
        store: &'a RepositoryStore,
        target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            hosting,
            vcs,
            spelling,
            store,
            target: target.into(),
            report_name: DEFAULT_REPORT.to_string(),
        }
    }

    /// Name of the spelling report written into each checkout.
    pub fn with_report_name(mut self, name: impl Into<String>) -> Self {
        self.report_name = name.into();
        self
    }

    /// Acquire the first candidate that is neither forked already nor
    /// archived upstream.
    ///
    /// Archived candidates are still forked before being skipped, since the
    /// archive flag is only checked afterwards; a later run then sees them as
    /// forked. Returns `None` when every candidate was skipped.
    pub fn acquire_next(&self, candidates: &[RepoSlug]) -> Result<Option<RepositoryRecord>> {
        for upstream in candidates {
            if self.hosting.is_forked(&upstream.name)? {
                tracing::debug!(%upstream, "already forked, skipping");
                continue;
            }
            self.hosting.fork(upstream)?;
            if self.hosting.is_archived(upstream)? {
                tracing::warn!(%upstream, "upstream archived, skipping");
                continue;
            }
            return self.acquire(upstream).map(Some);
        }
        tracing::info!(count = candidates.len(), "no candidate left to acquire");
        Ok(None)
    }

    fn acquire(&self, upstream: &RepoSlug) -> Result<RepositoryRecord> {
        let name = upstream.name.as_str();
        let checkout = self.target.join(name);

        let url = self.hosting.clone_url(name)?;
        self.vcs.clone_repository(&url, &checkout)?;
        write_report(self.spelling, &checkout, &self.report_name)?;

        let record = RepositoryRecord::new(name, &checkout);
        self.store.register(&record)?;

        if !self.hosting.issues_enabled(name)? {
            let marker = Sentinel::IssuesDisabled.path_in(&checkout);
            typofix_fs::io::write_text(&marker, "No Issues.\n")?;
            tracing::info!(name, "fork has issues disabled");
        }
        tracing::info!(%upstream, path = %checkout.display(), "acquired repository");
        Ok(record)
    }
}
