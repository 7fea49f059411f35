//! Error types for catalog configuration

use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for loading and validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but a value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
