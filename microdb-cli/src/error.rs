//! Error types for microdb-cli

use thiserror::Error;

/// Result type alias for microdb-cli operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Database(#[from] microdb::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}
