//! Flavor discovery.
//!
//! Recommends the generic size tier closest to raw cores/memory/GPU
//! constraints, for requests that want a named tier suggested instead of
//! an exact-spec scan. Only tiers where every constituent flavor meets the
//! hard floor qualify; the recommendation minimizes over-provisioning
//! above that floor, never below it.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use yamlforge_catalog::FlavorCatalog;
use yamlforge_spec::{GpuSpec, Provider};

use crate::error::{SelectError, SelectResult};

const MB_PER_GB: f64 = 1024.0;

/// Cross-provider averaged specs for a tier, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSpecs {
    pub avg_vcpus: f64,
    pub avg_memory_gb: f64,
    pub avg_gpu_count: f64,
}

/// A recommended size tier with its supporting providers.
#[derive(Debug, Clone, Serialize)]
pub struct TierRecommendation {
    pub tier: String,
    pub specs: TierSpecs,
    pub providers: BTreeSet<Provider>,
}

/// Find the generic size tier that most closely fits the constraints.
///
/// GPU-bearing tiers are skipped unless a GPU was requested or
/// `allow_gpu_tiers` opts them in.
pub fn find_best_size_tier(
    cores: u32,
    memory_mb: u32,
    gpu_spec: Option<&GpuSpec>,
    allow_gpu_tiers: bool,
    catalog: &FlavorCatalog,
) -> SelectResult<TierRecommendation> {
    let memory_floor_gb = memory_mb as f64 / MB_PER_GB;
    let mut best: Option<(f64, TierRecommendation)> = None;

    for tier in catalog.tiers() {
        let providers = catalog.providers_with_tier(tier);
        let flavors: Vec<_> = providers
            .iter()
            .flat_map(|p| catalog.lookup(*p, tier))
            .collect();
        if flavors.is_empty() {
            continue;
        }

        let has_gpu = flavors.iter().any(|f| f.gpu_count > 0);
        if has_gpu && gpu_spec.is_none() && !allow_gpu_tiers {
            continue;
        }

        // Every constituent flavor must clear the floor, so the tier is
        // safe to request on any supporting provider.
        let floor_ok = flavors.iter().all(|f| {
            f.vcpus >= cores
                && f.memory_gb >= memory_floor_gb
                && gpu_spec.map_or(true, |g| f.gpu_count >= g.count)
        });
        if !floor_ok {
            continue;
        }

        let n = flavors.len() as f64;
        let specs = TierSpecs {
            avg_vcpus: flavors.iter().map(|f| f.vcpus as f64).sum::<f64>() / n,
            avg_memory_gb: flavors.iter().map(|f| f.memory_gb).sum::<f64>() / n,
            avg_gpu_count: flavors.iter().map(|f| f.gpu_count as f64).sum::<f64>() / n,
        };

        let overshoot =
            (specs.avg_vcpus - cores as f64) + (specs.avg_memory_gb - memory_floor_gb);

        let better = match &best {
            Some((best_overshoot, _)) => overshoot < *best_overshoot,
            None => true,
        };
        if better {
            best = Some((
                overshoot,
                TierRecommendation {
                    tier: tier.to_string(),
                    specs,
                    providers,
                },
            ));
        }
    }

    match best {
        Some((overshoot, recommendation)) => {
            debug!(
                tier = %recommendation.tier,
                overshoot,
                "Tier recommendation"
            );
            Ok(recommendation)
        }
        None => Err(SelectError::no_candidate_flavor(
            "discovery",
            format!(
                "no size tier meets {} cores / {:.1} GB on all supporting providers",
                cores, memory_floor_gb
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlforge_catalog::FlavorOption;

    fn flavor(
        provider: Provider,
        tier: &str,
        vcpus: u32,
        memory_gb: f64,
        gpu: Option<(u32, &str)>,
    ) -> FlavorOption {
        FlavorOption {
            provider,
            size_tier: tier.to_string(),
            native_type_id: format!("{}-{}", provider, tier),
            vcpus,
            memory_gb,
            gpu_count: gpu.map_or(0, |(c, _)| c),
            gpu_type: gpu.map(|(_, t)| t.to_string()),
            base_hourly_cost: 0.1,
            cost_factor: 1.0,
        }
    }

    fn catalog() -> FlavorCatalog {
        let mut c = FlavorCatalog::empty();
        c.insert(flavor(Provider::Aws, "medium", 2, 4.0, None)).unwrap();
        c.insert(flavor(Provider::Gcp, "medium", 2, 4.0, None)).unwrap();
        c.insert(flavor(Provider::Aws, "xlarge", 4, 16.0, None)).unwrap();
        c.insert(flavor(Provider::Gcp, "xlarge", 4, 16.0, None)).unwrap();
        c.insert(flavor(Provider::Aws, "2xlarge", 8, 32.0, None)).unwrap();
        c.insert(flavor(Provider::Aws, "gpu_t4_small", 4, 16.0, Some((1, "NVIDIA T4"))))
            .unwrap();
        c
    }

    #[test]
    fn test_closest_fit_above_floor() {
        let rec = find_best_size_tier(4, 8192, None, false, &catalog()).unwrap();

        // xlarge (4 vcpu / 16 GB) overshoots less than 2xlarge.
        assert_eq!(rec.tier, "xlarge");
        assert_eq!(rec.specs.avg_vcpus, 4.0);
        assert_eq!(
            rec.providers,
            BTreeSet::from([Provider::Aws, Provider::Gcp])
        );
    }

    #[test]
    fn test_gpu_tiers_skipped_without_gpu_request() {
        let rec = find_best_size_tier(4, 8192, None, false, &catalog()).unwrap();
        assert_ne!(rec.tier, "gpu_t4_small");

        // With the opt-in flag, the GPU tier competes and fits just as well.
        let rec = find_best_size_tier(4, 16384, None, true, &catalog()).unwrap();
        assert!(rec.tier == "xlarge" || rec.tier == "gpu_t4_small");
    }

    #[test]
    fn test_gpu_floor_restricts_tiers() {
        let gpu = GpuSpec { count: 1, gpu_type: None };
        let rec = find_best_size_tier(2, 4096, Some(&gpu), false, &catalog()).unwrap();
        assert_eq!(rec.tier, "gpu_t4_small");
    }

    #[test]
    fn test_unsatisfiable_floor_errors() {
        let result = find_best_size_tier(128, 1048576, None, false, &catalog());
        assert!(matches!(result, Err(SelectError::NoCandidateFlavor { .. })));
    }
}
