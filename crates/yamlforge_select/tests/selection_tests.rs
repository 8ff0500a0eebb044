//! End-to-end selection scenarios against synthetic catalogs and policies.

use std::collections::BTreeSet;

use yamlforge_catalog::{FlavorCatalog, FlavorOption};
use yamlforge_policy::{PolicyDefaults, ProviderPolicy};
use yamlforge_select::{
    resolve_instance, select, AdjustedCandidate, ExclusionReason, SelectError,
};
use yamlforge_spec::{GpuSpec, InstanceRequest, Provider, RequestedProvider, SizeSpec};

fn flavor(
    provider: Provider,
    tier: &str,
    native: &str,
    vcpus: u32,
    memory_gb: f64,
    cost: f64,
) -> FlavorOption {
    FlavorOption {
        provider,
        size_tier: tier.to_string(),
        native_type_id: native.to_string(),
        vcpus,
        memory_gb,
        gpu_count: 0,
        gpu_type: None,
        base_hourly_cost: cost,
        cost_factor: 1.0,
    }
}

fn gpu_flavor(
    provider: Provider,
    tier: &str,
    native: &str,
    vcpus: u32,
    memory_gb: f64,
    cost: f64,
    gpu_count: u32,
    gpu_type: &str,
) -> FlavorOption {
    FlavorOption {
        gpu_count,
        gpu_type: Some(gpu_type.to_string()),
        ..flavor(provider, tier, native, vcpus, memory_gb, cost)
    }
}

/// Two-provider catalog matching the spec's medium-tier pricing scenario.
fn medium_catalog() -> FlavorCatalog {
    let mut catalog = FlavorCatalog::empty();
    catalog
        .insert(flavor(Provider::Aws, "medium", "t3.medium", 2, 4.0, 0.0416))
        .unwrap();
    catalog
        .insert(flavor(Provider::Gcp, "medium", "e2-medium", 2, 4.0, 0.0335))
        .unwrap();
    catalog
}

fn gpu_catalog() -> FlavorCatalog {
    let mut catalog = medium_catalog();
    catalog
        .insert(gpu_flavor(
            Provider::Aws,
            "gpu_v520_small",
            "g4ad.4xlarge",
            16,
            64.0,
            0.867,
            1,
            "AMD Radeon Pro V520",
        ))
        .unwrap();
    catalog
        .insert(gpu_flavor(
            Provider::Gcp,
            "gpu_t4_small",
            "n1-standard-4-t4",
            4,
            15.0,
            0.54,
            1,
            "NVIDIA T4",
        ))
        .unwrap();
    catalog
}

fn all_enabled() -> BTreeSet<Provider> {
    Provider::all().into_iter().collect()
}

fn cheapest_medium(name: &str) -> InstanceRequest {
    InstanceRequest::new(
        name,
        RequestedProvider::Cheapest,
        SizeSpec::NamedSize { tier: "medium".to_string() },
        None,
    )
    .unwrap()
    .with_location("us-east")
}

#[test]
fn scenario_cheapest_medium_picks_gcp() {
    let catalog = medium_catalog();
    let policy = ProviderPolicy::default();

    let result =
        resolve_instance(&cheapest_medium("web-1"), &all_enabled(), &catalog, &policy).unwrap();

    assert_eq!(result.winner.provider(), Provider::Gcp);
    assert_eq!(result.winner.adjusted_hourly_cost, 0.0335);
    assert_eq!(result.ranked_candidates.len(), 2);
}

#[test]
fn scenario_discount_flips_winner_to_aws() {
    let catalog = medium_catalog();
    let policy = ProviderPolicy::build(
        PolicyDefaults::default(),
        [("YAMLFORGE_DISCOUNT_AWS", "25")],
    );

    let result =
        resolve_instance(&cheapest_medium("web-1"), &all_enabled(), &catalog, &policy).unwrap();

    assert_eq!(result.winner.provider(), Provider::Aws);
    assert_eq!(result.winner.adjusted_hourly_cost, 0.0416 * 0.75);
}

#[test]
fn discount_env_overrides_config_value() {
    let catalog = medium_catalog();
    let defaults = PolicyDefaults {
        provider_discounts: [(Provider::Aws, 10.0)].into_iter().collect(),
        ..Default::default()
    };
    let policy = ProviderPolicy::build(defaults, [("YAMLFORGE_DISCOUNT_AWS", "25")]);

    let result =
        resolve_instance(&cheapest_medium("web-1"), &all_enabled(), &catalog, &policy).unwrap();

    let aws = result
        .ranked_candidates
        .iter()
        .find(|c| c.provider() == Provider::Aws)
        .unwrap();
    assert_eq!(aws.discount_pct, 25.0);
    assert_eq!(aws.adjusted_hourly_cost, 0.0416 * 0.75);
}

#[test]
fn scenario_amd_gpu_only_on_aws() {
    let catalog = gpu_catalog();
    let policy = ProviderPolicy::default();

    let mut request = InstanceRequest::new(
        "gpu-1",
        RequestedProvider::Cheapest,
        SizeSpec::ExactSpec { cores: 8, memory_mb: 32768 },
        Some(GpuSpec {
            count: 1,
            gpu_type: Some("AMD Radeon Pro V520".to_string()),
        }),
    )
    .unwrap();
    request = request.with_location("us-east");

    let enabled = BTreeSet::from([Provider::Aws, Provider::Gcp]);
    let result = resolve_instance(&request, &enabled, &catalog, &policy).unwrap();

    assert_eq!(result.winner.provider(), Provider::Aws);
    assert_eq!(
        result.excluded_providers.get(&Provider::Gcp),
        Some(&ExclusionReason::GpuTypeUnavailable)
    );
}

#[test]
fn scenario_unknown_gpu_type_lists_known_types() {
    let catalog = gpu_catalog();
    let policy = ProviderPolicy::default();

    let request = InstanceRequest::new(
        "gpu-x",
        RequestedProvider::Cheapest,
        SizeSpec::ExactSpec { cores: 4, memory_mb: 8192 },
        Some(GpuSpec {
            count: 1,
            gpu_type: Some("NVIDIA H100".to_string()),
        }),
    )
    .unwrap();

    let enabled = BTreeSet::from([Provider::Aws, Provider::Gcp]);
    let error = resolve_instance(&request, &enabled, &catalog, &policy).unwrap_err();

    match &error {
        SelectError::NoEligibleProvider { known_gpu_types, reasons, .. } => {
            assert!(known_gpu_types.contains("nvidia t4"));
            assert!(known_gpu_types.contains("amd radeon pro v520"));
            assert_eq!(
                reasons.get(&Provider::Aws),
                Some(&ExclusionReason::GpuTypeUnavailable)
            );
        }
        other => panic!("expected NoEligibleProvider, got {:?}", other),
    }
    assert!(error.to_string().contains("known GPU types"));
}

#[test]
fn scenario_instance_exclusions_override_global() {
    let catalog = medium_catalog();
    let defaults = PolicyDefaults {
        exclude_from_cheapest: vec![Provider::Gcp],
        ..Default::default()
    };
    let policy = ProviderPolicy::build(defaults, std::iter::empty::<(&str, &str)>());

    // Globally gcp is excluded; this request overrides with {aws} instead,
    // so gcp is back in and wins on cost.
    let request = cheapest_medium("web-1").with_exclusions(BTreeSet::from([Provider::Aws]));

    let result = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap();

    assert_eq!(result.winner.provider(), Provider::Gcp);
    assert_eq!(
        result.excluded_providers.get(&Provider::Aws),
        Some(&ExclusionReason::InstanceExcluded)
    );
    assert!(!result.excluded_providers.contains_key(&Provider::Gcp));
}

#[test]
fn concrete_provider_bypasses_everything() {
    let catalog = medium_catalog();
    let defaults = PolicyDefaults {
        exclude_from_cheapest: vec![Provider::Aws],
        ..Default::default()
    };
    let policy = ProviderPolicy::build(defaults, std::iter::empty::<(&str, &str)>());

    let request = InstanceRequest::new(
        "pinned",
        RequestedProvider::Concrete(Provider::Aws),
        SizeSpec::NamedSize { tier: "medium".to_string() },
        None,
    )
    .unwrap();

    let result = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap();

    assert_eq!(result.winner.provider(), Provider::Aws);
    assert!(result.excluded_providers.is_empty());
}

#[test]
fn floor_invariant_holds_for_all_candidates() {
    let catalog = FlavorCatalog::builtin().unwrap();
    let policy = ProviderPolicy::default();

    let request = InstanceRequest::new(
        "big",
        RequestedProvider::Cheapest,
        SizeSpec::ExactSpec { cores: 8, memory_mb: 32768 },
        None,
    )
    .unwrap();

    let result = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap();

    for candidate in &result.ranked_candidates {
        assert!(candidate.flavor.vcpus >= 8, "{:?}", candidate.flavor);
        assert!(candidate.flavor.memory_gb >= 32.0, "{:?}", candidate.flavor);
    }
}

#[test]
fn resolution_is_deterministic() {
    let catalog = FlavorCatalog::builtin().unwrap();
    let defaults = PolicyDefaults::builtin().unwrap();
    let policy = ProviderPolicy::build(defaults, std::iter::empty::<(&str, &str)>());

    let request = cheapest_medium("web-1");

    let first = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap();
    let second = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap();

    assert_eq!(first.winner, second.winner);
    assert_eq!(first.ranked_candidates, second.ranked_candidates);
}

#[test]
fn no_candidate_flavor_is_distinct_from_no_eligible_provider() {
    let catalog = medium_catalog();
    let policy = ProviderPolicy::default();

    // Providers exist but nothing offers this tier.
    let request = InstanceRequest::new(
        "huge",
        RequestedProvider::Cheapest,
        SizeSpec::NamedSize { tier: "16xlarge".to_string() },
        None,
    )
    .unwrap();

    let error = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap_err();
    assert!(matches!(error, SelectError::NoCandidateFlavor { .. }));
    assert_eq!(error.instance(), "huge");

    // Exclude everything: eligibility fails first, with the other error.
    let defaults = PolicyDefaults {
        exclude_from_cheapest: Provider::all(),
        ..Default::default()
    };
    let policy = ProviderPolicy::build(defaults, std::iter::empty::<(&str, &str)>());
    let error =
        resolve_instance(&cheapest_medium("web-1"), &all_enabled(), &catalog, &policy).unwrap_err();
    assert!(matches!(error, SelectError::NoEligibleProvider { .. }));
}

#[test]
fn cost_tie_footprint_break_spans_interleaved_providers() {
    let policy = ProviderPolicy {
        priority_order: vec![Provider::Aws],
        ..Default::default()
    };

    fn tied(provider: Provider, native: &str, vcpus: u32, memory_gb: f64) -> AdjustedCandidate {
        AdjustedCandidate {
            flavor: flavor(provider, "medium", native, vcpus, memory_gb, 0.05),
            discount_pct: 0.0,
            region_cost_factor: 1.0,
            provider_cost_factor: 1.0,
            adjusted_hourly_cost: 0.05,
        }
    }

    // Both providers are unlisted and everything ties on cost; a large cnv
    // flavor sits before a vmware flavor that separates it from its small
    // sibling. The footprint tie-break must still reach across the gap.
    let result = select(
        vec![
            tied(Provider::Cnv, "cnv-8x4", 8, 4.0),
            tied(Provider::Vmware, "vm-2x4", 2, 4.0),
            tied(Provider::Cnv, "cnv-2x4", 2, 4.0),
        ],
        &policy,
    )
    .unwrap();

    assert_eq!(result.winner.flavor.footprint(), 8.0);
    let order: Vec<&str> = result
        .ranked_candidates
        .iter()
        .map(|c| c.flavor.native_type_id.as_str())
        .collect();
    assert_eq!(order, vec!["vm-2x4", "cnv-2x4", "cnv-8x4"]);
}

#[test]
fn regional_cost_factor_shifts_adjusted_cost() {
    let catalog = medium_catalog();
    let defaults = PolicyDefaults {
        regional_cost_factors: [("eu-west".to_string(), 1.08)].into_iter().collect(),
        ..Default::default()
    };
    let policy = ProviderPolicy::build(defaults, std::iter::empty::<(&str, &str)>());

    let request = cheapest_medium("web-1");
    let eu_request = InstanceRequest {
        location: Some("eu-west".to_string()),
        ..request.clone()
    };

    let home = resolve_instance(&request, &all_enabled(), &catalog, &policy).unwrap();
    let eu = resolve_instance(&eu_request, &all_enabled(), &catalog, &policy).unwrap();

    assert_eq!(home.winner.adjusted_hourly_cost, 0.0335);
    assert_eq!(eu.winner.adjusted_hourly_cost, 0.0335 * 1.08);
}
