//! Error types for typofix-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from typofix-core
    #[error(transparent)]
    Core(#[from] typofix_core::Error),

    /// Error from typofix-fs
    #[error(transparent)]
    Fs(#[from] typofix_fs::Error),

    /// Error from typofix-hosting
    #[error(transparent)]
    Hosting(#[from] typofix_hosting::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Errors that end the interactive session instead of returning to the
    /// menu: the terminal itself is no longer usable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Dialoguer(_))
    }

    /// Errors the operator just needs to be told about.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::Core(e) if e.returns_to_menu())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_displays_message() {
        assert_eq!(CliError::user("test error").to_string(), "test error");
    }

    #[test]
    fn recoverable_core_errors_are_notices() {
        assert!(CliError::from(typofix_core::Error::NoDiffFound).is_notice());
        assert!(!CliError::user("x").is_notice());
        assert!(!CliError::from(typofix_core::Error::NoDiffFound).is_fatal());
    }
}
