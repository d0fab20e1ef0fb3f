//! Error types for the integrations crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for integration operations.
pub type IntegrationResult<T> = Result<T, IntegrationError>;

/// Errors that can occur outside the deterministic core.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Provide requirement_link or requirement_summary")]
    MissingRequirement,

    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidSetting { key: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntegrationError {
    /// Create an invalid setting error.
    pub fn invalid_setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingRequirement)
    }
}
