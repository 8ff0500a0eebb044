//! Provider eligibility filtering.
//!
//! Determines which providers may be considered at all for a request,
//! independent of cost. A concrete requested provider bypasses every
//! filter; the cheapest meta-providers go through exclusion lists and the
//! GPU capability matrix.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use yamlforge_catalog::FlavorCatalog;
use yamlforge_policy::ProviderPolicy;
use yamlforge_spec::{InstanceRequest, Provider, RequestedProvider};

/// Why a provider was removed from consideration. Surfaced in
/// [`SelectionResult::excluded_providers`](crate::SelectionResult) for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    GloballyExcluded,
    InstanceExcluded,
    NoGpuSupport,
    GpuTypeUnavailable,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ExclusionReason::GloballyExcluded => "globally excluded",
            ExclusionReason::InstanceExcluded => "excluded for this instance",
            ExclusionReason::NoGpuSupport => "no GPU support",
            ExclusionReason::GpuTypeUnavailable => "GPU type unavailable on provider",
        };
        write!(f, "{}", text)
    }
}

/// The eligible provider set plus per-provider exclusion diagnostics.
#[derive(Debug, Clone, Default)]
pub struct EligibilityOutcome {
    pub eligible: BTreeSet<Provider>,
    pub excluded: BTreeMap<Provider, ExclusionReason>,
}

/// Compute the candidate provider set for a request.
///
/// A concrete requested provider short-circuits to exactly that provider
/// with no exclusion or GPU filtering. Otherwise the enabled set is reduced
/// by the applicable exclusion list (the per-request override *replaces*
/// the global list when present) and, for GPU requests, by provider GPU
/// capability.
///
/// An empty eligible set is a hard failure for the caller, not an empty
/// soft result.
pub fn eligible_providers(
    request: &InstanceRequest,
    policy: &ProviderPolicy,
    enabled: &BTreeSet<Provider>,
    catalog: &FlavorCatalog,
) -> EligibilityOutcome {
    if let RequestedProvider::Concrete(provider) = request.provider {
        // Hard bypass: no cost logic runs at all.
        return EligibilityOutcome {
            eligible: BTreeSet::from([provider]),
            excluded: BTreeMap::new(),
        };
    }

    let mut outcome = EligibilityOutcome::default();

    let (exclusions, reason) = match &request.instance_exclusions {
        Some(overridden) => (overridden, ExclusionReason::InstanceExcluded),
        None => (&policy.global_exclusions, ExclusionReason::GloballyExcluded),
    };

    for provider in enabled {
        if exclusions.contains(provider) {
            outcome.excluded.insert(*provider, reason.clone());
        } else {
            outcome.eligible.insert(*provider);
        }
    }

    if request.wants_gpu() {
        let requested_type = request.gpu_spec.as_ref().and_then(|g| g.gpu_type.as_deref());
        let eligible = std::mem::take(&mut outcome.eligible);

        for provider in eligible {
            if !catalog.provider_has_gpu(provider) {
                outcome.excluded.insert(provider, ExclusionReason::NoGpuSupport);
            } else if let Some(gpu_type) = requested_type {
                if catalog.provider_has_gpu_type(provider, gpu_type) {
                    outcome.eligible.insert(provider);
                } else {
                    outcome
                        .excluded
                        .insert(provider, ExclusionReason::GpuTypeUnavailable);
                }
            } else {
                outcome.eligible.insert(provider);
            }
        }
    }

    debug!(
        instance = %request.name,
        eligible = outcome.eligible.len(),
        excluded = outcome.excluded.len(),
        "Eligibility computed"
    );

    outcome
}
