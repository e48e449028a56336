//! Error types for typofix-hosting

/// Result type for typofix-hosting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the code host
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Hosting API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Repository does not exist (or is not visible to the token)
    #[error("Repository not found: {slug}")]
    RepositoryNotFound { slug: String },

    /// No API token available
    #[error("No API token: set the {var} environment variable")]
    MissingToken { var: String },

    /// Repository identifier is not `owner/name`
    #[error("Invalid repository identifier '{input}': expected owner/name")]
    InvalidSlug { input: String },

    /// Parent chain did not reach a non-fork within the hop limit
    #[error("Fork chain of '{fork}' is deeper than {depth} repositories")]
    ForkChainTooDeep { fork: String, depth: usize },
}
