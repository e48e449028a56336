//! Error types for typofix-core

use std::path::PathBuf;

/// Result type for typofix-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in typofix-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Store is empty or the operator backed out of the selection
    #[error("No repositories available")]
    NoRepositoriesAvailable,

    /// Staged diff has no removed line or no added line
    #[error("Could not read diff: nothing staged, or no line was both removed and added")]
    NoDiffFound,

    /// First removed and first added lines do not differ word-wise
    #[error("Could not locate typo in the staged diff")]
    TypoNotLocated,

    /// Draft file without a blank second line
    #[error("Needs to be a blank second line for {path}")]
    MalformedDraft { path: PathBuf },

    /// No saved change for the repository
    #[error("No pending change saved for '{name}'")]
    PendingChangeNotFound { name: String },

    /// Repository name not present in the store
    #[error("Unknown repository '{name}'")]
    UnknownRepository { name: String },

    /// Directory to register does not exist
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A submission step was chosen without a code host to submit to
    #[error("Cannot {step}: no hosting API available")]
    HostingUnavailable { step: &'static str },

    /// Spelling checker could not be run
    #[error("Spelling check failed: {message}")]
    Spelling { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from typofix-fs
    #[error(transparent)]
    Fs(#[from] typofix_fs::Error),

    /// Version-control error from typofix-git
    #[error(transparent)]
    Git(#[from] typofix_git::Error),

    /// Hosting API error from typofix-hosting
    #[error(transparent)]
    Hosting(#[from] typofix_hosting::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error only aborts the current attempt and the operator
    /// should simply be sent back to the menu.
    pub fn returns_to_menu(&self) -> bool {
        matches!(
            self,
            Self::NoRepositoriesAvailable
                | Self::NoDiffFound
                | Self::TypoNotLocated
                | Self::PendingChangeNotFound { .. }
        )
    }
}
