//! Error types for Terraform emission.

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur while emitting Terraform.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("No region mapping for location '{location}' on provider {provider}")]
    RegionUnmapped { location: String, provider: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
