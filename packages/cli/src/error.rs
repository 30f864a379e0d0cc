//! CLI error types

use devkit_jwt::JwtError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Everything that stops a command from producing output
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file unreadable, malformed or carrying invalid values
    #[error("Failed to load config {}: {reason}", path.display())]
    Config {
        /// File that failed to load
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Reading a key file or stdin failed
    #[error("Failed to read {what}: {source}")]
    Io {
        /// Description of what was being read
        what: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Argument or payload rejected before reaching the engine
    #[error("Invalid input: {0}")]
    Input(String),

    /// Engine error, already carrying its operation prefix
    #[error(transparent)]
    Jwt(#[from] JwtError),
}

impl CliError {
    /// Create an input error
    #[must_use]
    pub fn input(msg: &str) -> Self {
        CliError::Input(msg.to_string())
    }
}
