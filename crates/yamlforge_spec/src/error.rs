//! Error types for the spec module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while reading and validating input configs.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid instance spec for '{instance}': {message}")]
    InvalidRequestSpec { instance: String, message: String },

    #[error("Duplicate instance name: {0}")]
    DuplicateInstance(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
