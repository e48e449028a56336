//! Typo extraction from a staged diff
//!
//! The staged change is assumed to be a minimal single-word substitution.
//! File paths come from every old-file header in the diff, while the words
//! come only from the first removed and first added lines; a diff touching
//! several files or hunks therefore reports all of their paths against one
//! typo. Anything more elaborate has to be fixed by hand before staging.

use std::path::Path;

use typofix_git::VersionControl;

use crate::{Error, Result};

const OLD_FILE_HEADER: &str = "--- a/";

/// A correction read from a staged diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedTypo {
    pub delete_word: String,
    pub add_word: String,
    /// Old-file paths in order of appearance
    pub file_paths: Vec<String>,
}

/// Derive the typo from unified diff text.
///
/// # Errors
///
/// - [`Error::NoDiffFound`] if there is no removed line or no added line
/// - [`Error::TypoNotLocated`] if no word position differs between them
pub fn parse_staged_diff(diff: &str) -> Result<StagedTypo> {
    let file_paths: Vec<String> = diff
        .lines()
        .filter_map(|line| line.strip_prefix(OLD_FILE_HEADER))
        .map(str::to_string)
        .collect();

    let deleted = diff
        .lines()
        .find(|line| line.starts_with('-') && !line.starts_with("--- "))
        .map(|line| &line[1..]);
    let added = diff
        .lines()
        .find(|line| line.starts_with('+') && !line.starts_with("+++ "))
        .map(|line| &line[1..]);

    let (Some(deleted), Some(added)) = (deleted, added) else {
        return Err(Error::NoDiffFound);
    };

    deleted
        .split_whitespace()
        .zip(added.split_whitespace())
        .find(|(old, new)| old != new)
        .map(|(old, new)| StagedTypo {
            delete_word: old.to_string(),
            add_word: new.to_string(),
            file_paths,
        })
        .ok_or(Error::TypoNotLocated)
}

/// Read the staged diff of `repo_dir` and derive its typo.
pub fn extract_typo(vcs: &dyn VersionControl, repo_dir: &Path) -> Result<StagedTypo> {
    let diff = vcs.staged_diff(repo_dir)?;
    tracing::debug!(repo = %repo_dir.display(), bytes = diff.len(), "read staged diff");
    let typo = parse_staged_diff(&diff)?;
    tracing::info!(
        delete = %typo.delete_word,
        add = %typo.add_word,
        files = typo.file_paths.len(),
        "located typo"
    );
    Ok(typo)
}
