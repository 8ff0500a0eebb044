//! Candidate flavor generation.
//!
//! Resolves an instance request into concrete flavor candidates from the
//! catalog, one pass per eligible provider. Resource floors are hard: a
//! flavor never qualifies by being "close enough" below the requested
//! cores or memory.

use std::collections::BTreeSet;

use tracing::debug;

use yamlforge_catalog::{gpu_types_match, FlavorCatalog, FlavorOption};
use yamlforge_spec::{GpuSpec, InstanceRequest, Provider, SizeSpec};

/// Megabytes per gigabyte, for the memory floor conversion.
const MB_PER_GB: f64 = 1024.0;

/// Generate all qualifying flavor candidates for a request.
///
/// Named tiers are a direct lookup; providers missing the tier contribute
/// zero candidates. Exact specs scan every flavor of every eligible
/// provider and keep all options meeting both floors, not just the
/// smallest. Providers are visited in sorted order so the output is
/// deterministic.
pub fn generate_candidates(
    request: &InstanceRequest,
    providers: &BTreeSet<Provider>,
    catalog: &FlavorCatalog,
) -> Vec<FlavorOption> {
    let mut candidates = Vec::new();

    for provider in providers {
        match &request.size_spec {
            SizeSpec::NamedSize { tier } => {
                candidates.extend(catalog.lookup(*provider, tier).iter().cloned());
            }
            SizeSpec::ExactSpec { cores, memory_mb } => {
                let memory_floor_gb = *memory_mb as f64 / MB_PER_GB;
                candidates.extend(
                    catalog
                        .scan_provider(*provider)
                        .filter(|f| f.vcpus >= *cores && f.memory_gb >= memory_floor_gb)
                        .cloned(),
                );
            }
        }
    }

    if let Some(gpu) = &request.gpu_spec {
        candidates.retain(|f| meets_gpu_floor(f, gpu));
    }

    debug!(
        instance = %request.name,
        count = candidates.len(),
        "Candidates generated"
    );

    candidates
}

fn meets_gpu_floor(flavor: &FlavorOption, gpu: &GpuSpec) -> bool {
    if flavor.gpu_count < gpu.count {
        return false;
    }
    match (&gpu.gpu_type, &flavor.gpu_type) {
        (Some(requested), Some(offered)) => gpu_types_match(requested, offered),
        (Some(_), None) => false,
        (None, _) => true,
    }
}
