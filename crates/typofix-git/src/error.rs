//! Error types for typofix-git

use std::path::PathBuf;

/// Result type for typofix-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in typofix-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] typofix_fs::Error),

    #[error("HEAD is detached in {path}; check out a branch first")]
    DetachedHead { path: PathBuf },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Nothing staged to commit in {path}")]
    NothingToCommit { path: PathBuf },
}
