//! Crate-level error types

use thiserror::Error;

/// Errors from harness operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("NPY write error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),

    #[error(transparent)]
    Validation(#[from] crate::config::ValidationError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;
