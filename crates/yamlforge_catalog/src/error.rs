//! Error types for the catalog module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    #[error("Invalid flavor '{native_type}' for provider {provider}: {message}")]
    InvalidFlavor {
        provider: String,
        native_type: String,
        message: String,
    },

    #[error("Unknown provider in catalog file: {0}")]
    UnknownProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
