//! Error types for the selection engine.
//!
//! Fatal errors are per-instance: the caller reports them with the
//! offending instance name and continues with the remaining instances.
//! Malformed discount overrides are not represented here; they are logged
//! and ignored during policy construction.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use yamlforge_spec::Provider;

use crate::eligibility::ExclusionReason;

/// Result type alias for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors that can occur while resolving an instance request.
#[derive(Error, Debug)]
pub enum SelectError {
    /// Eligibility filtering removed every provider.
    #[error("instance '{instance}': no eligible provider ({detail})")]
    NoEligibleProvider {
        instance: String,
        detail: String,
        reasons: BTreeMap<Provider, ExclusionReason>,
        /// Canonical GPU types the catalog knows, for diagnostic display
        /// when a GPU request named a type no provider offers.
        known_gpu_types: BTreeSet<String>,
    },

    /// Providers were eligible but none offered a qualifying flavor.
    #[error("instance '{instance}': no flavor meets the request ({detail})")]
    NoCandidateFlavor { instance: String, detail: String },
}

impl SelectError {
    pub fn no_eligible_provider(
        instance: impl Into<String>,
        reasons: BTreeMap<Provider, ExclusionReason>,
        known_gpu_types: BTreeSet<String>,
    ) -> Self {
        let mut detail = if reasons.is_empty() {
            "no providers enabled".to_string()
        } else {
            reasons
                .iter()
                .map(|(provider, reason)| format!("{}: {}", provider, reason))
                .collect::<Vec<_>>()
                .join(", ")
        };

        if !known_gpu_types.is_empty()
            && reasons
                .values()
                .any(|r| *r == ExclusionReason::GpuTypeUnavailable)
        {
            detail.push_str(&format!(
                "; known GPU types: {}",
                known_gpu_types.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }

        SelectError::NoEligibleProvider {
            instance: instance.into(),
            detail,
            reasons,
            known_gpu_types,
        }
    }

    pub fn no_candidate_flavor(instance: impl Into<String>, detail: impl Into<String>) -> Self {
        SelectError::NoCandidateFlavor {
            instance: instance.into(),
            detail: detail.into(),
        }
    }

    /// The name of the instance this error belongs to.
    pub fn instance(&self) -> &str {
        match self {
            SelectError::NoEligibleProvider { instance, .. } => instance,
            SelectError::NoCandidateFlavor { instance, .. } => instance,
        }
    }
}
