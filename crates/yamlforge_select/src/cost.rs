//! Cost adjustment.
//!
//! Applies the three independent adjustments to a raw hourly cost: the
//! per-provider discount, the regional cost factor, and the provider cost
//! factor. All math stays in floating point; rounding happens only at
//! display time.

use serde::Serialize;

use yamlforge_catalog::FlavorOption;
use yamlforge_policy::ProviderPolicy;
use yamlforge_spec::Provider;

/// A flavor with its cost adjustments resolved, scoped to one request
/// evaluation. Never cached across requests: discounts and regions differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedCandidate {
    pub flavor: FlavorOption,
    /// Resolved discount percentage, 0-100 (env override beats config).
    pub discount_pct: f64,
    pub region_cost_factor: f64,
    pub provider_cost_factor: f64,
    /// `base × (1 − discount/100) × region_factor × provider_factor`.
    pub adjusted_hourly_cost: f64,
}

impl AdjustedCandidate {
    pub fn provider(&self) -> Provider {
        self.flavor.provider
    }
}

/// Adjust one flavor's cost for a request evaluated in `region`.
pub fn adjust(
    flavor: FlavorOption,
    region: Option<&str>,
    policy: &ProviderPolicy,
) -> AdjustedCandidate {
    let discount_pct = policy.discount_pct(flavor.provider);
    let region_cost_factor = policy.region_cost_factor(region);
    let provider_cost_factor = policy.provider_cost_factor(flavor.provider);

    let adjusted_hourly_cost = flavor.base_hourly_cost
        * (1.0 - discount_pct / 100.0)
        * region_cost_factor
        * provider_cost_factor;

    AdjustedCandidate {
        flavor,
        discount_pct,
        region_cost_factor,
        provider_cost_factor,
        adjusted_hourly_cost,
    }
}
