//! Selection and tie-breaking.
//!
//! Ranks adjusted candidates and picks the winner. The ranking is a pure
//! function of its inputs: identical (request, catalog, policy) triples
//! always produce identical output, so cost decisions are reproducible and
//! auditable.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use yamlforge_catalog::FlavorCatalog;
use yamlforge_policy::ProviderPolicy;
use yamlforge_spec::{InstanceRequest, Provider, SizeSpec};

use crate::candidates::generate_candidates;
use crate::cost::{adjust, AdjustedCandidate};
use crate::eligibility::{eligible_providers, ExclusionReason};
use crate::error::{SelectError, SelectResult};

/// The decision output for one instance request.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResult {
    /// Always equal to `ranked_candidates[0]`.
    pub winner: AdjustedCandidate,
    /// Every candidate, ascending adjusted cost, ties broken by policy.
    pub ranked_candidates: Vec<AdjustedCandidate>,
    /// Providers removed during eligibility filtering, with reasons.
    pub excluded_providers: BTreeMap<Provider, ExclusionReason>,
}

/// Rank candidates and pick a winner. Returns `None` for an empty input;
/// the caller decides which error that maps to.
///
/// Sort chain: adjusted cost ascending; exact cost ties by priority-order
/// index (providers absent from the order sort last); remaining ties by
/// smallest `vcpus × memory_gb` footprint, then encounter order. Realized
/// as two stable passes so each key is a total order: the footprint pass
/// runs first and decides only where the later keys tie exactly.
pub fn select(
    candidates: Vec<AdjustedCandidate>,
    policy: &ProviderPolicy,
) -> Option<SelectionResult> {
    if candidates.is_empty() {
        return None;
    }

    let mut ranked = candidates;
    ranked.sort_by(|a, b| compare_cost(a.flavor.footprint(), b.flavor.footprint()));
    ranked.sort_by(|a, b| {
        compare_cost(a.adjusted_hourly_cost, b.adjusted_hourly_cost).then_with(|| {
            policy
                .priority_index(a.provider())
                .cmp(&policy.priority_index(b.provider()))
        })
    });

    let winner = ranked[0].clone();
    debug!(
        provider = %winner.provider(),
        flavor = %winner.flavor.native_type_id,
        cost = winner.adjusted_hourly_cost,
        "Winner selected"
    );

    Some(SelectionResult {
        winner,
        ranked_candidates: ranked,
        excluded_providers: BTreeMap::new(),
    })
}

/// Exact comparison: tie-breaking applies only on true float equality,
/// never within an epsilon, since both costs derive from the same
/// deterministic arithmetic.
fn compare_cost(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Resolve one instance request end to end: eligibility → candidates →
/// cost adjustment → selection.
pub fn resolve_instance(
    request: &InstanceRequest,
    enabled: &BTreeSet<Provider>,
    catalog: &FlavorCatalog,
    policy: &ProviderPolicy,
) -> SelectResult<SelectionResult> {
    let outcome = eligible_providers(request, policy, enabled, catalog);

    if outcome.eligible.is_empty() {
        let known_gpu_types = if request.wants_gpu() {
            catalog.known_gpu_types()
        } else {
            BTreeSet::new()
        };
        return Err(SelectError::no_eligible_provider(
            &request.name,
            outcome.excluded,
            known_gpu_types,
        ));
    }

    let candidates = generate_candidates(request, &outcome.eligible, catalog);
    if candidates.is_empty() {
        return Err(SelectError::no_candidate_flavor(
            &request.name,
            describe_size(&request.size_spec),
        ));
    }

    let adjusted = candidates
        .into_iter()
        .map(|flavor| adjust(flavor, request.location.as_deref(), policy))
        .collect();

    let mut result = match select(adjusted, policy) {
        Some(result) => result,
        None => {
            return Err(SelectError::no_candidate_flavor(
                &request.name,
                describe_size(&request.size_spec),
            ))
        }
    };
    result.excluded_providers = outcome.excluded;

    info!(
        instance = %request.name,
        provider = %result.winner.provider(),
        flavor = %result.winner.flavor.native_type_id,
        cost = format!("{:.4}", result.winner.adjusted_hourly_cost),
        "Instance resolved"
    );

    Ok(result)
}

fn describe_size(size_spec: &SizeSpec) -> String {
    match size_spec {
        SizeSpec::NamedSize { tier } => format!("no provider offers tier '{}'", tier),
        SizeSpec::ExactSpec { cores, memory_mb } => format!(
            "no flavor meets {} cores / {:.0} GB",
            cores,
            *memory_mb as f64 / 1024.0
        ),
    }
}
