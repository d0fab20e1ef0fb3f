//! Error types for the core crate.
//!
//! Analysis and generation are total and never fail; only exporting
//! artifacts to a text format can.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while exporting generated artifacts.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
