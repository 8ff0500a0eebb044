//! Provider selection policy.
//!
//! A [`ProviderPolicy`] is built once at process start by merging a static
//! defaults file with `YAMLFORGE_*` environment overrides, then passed by
//! reference into every selection function. No other component reads the
//! process environment.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use yamlforge_spec::Provider;

use crate::error::{PolicyError, PolicyResult};

/// Env var prefix for per-provider discount overrides.
const DISCOUNT_PREFIX: &str = "YAMLFORGE_DISCOUNT_";
/// Env var holding a comma-separated exclusion list (unions with defaults).
const EXCLUDE_VAR: &str = "YAMLFORGE_EXCLUDE_PROVIDERS";

const BUILTIN_DEFAULTS: &str = include_str!("../data/defaults.yaml");

/// Static policy defaults as written in the defaults file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyDefaults {
    #[serde(default)]
    pub exclude_from_cheapest: Vec<Provider>,
    #[serde(default)]
    pub priority_order: Vec<Provider>,
    #[serde(default)]
    pub provider_discounts: BTreeMap<Provider, f64>,
    #[serde(default)]
    pub regional_cost_factors: BTreeMap<String, f64>,
    #[serde(default)]
    pub provider_cost_factors: BTreeMap<Provider, f64>,
}

impl PolicyDefaults {
    /// Load the embedded defaults.
    pub fn builtin() -> PolicyResult<Self> {
        Self::from_yaml(BUILTIN_DEFAULTS)
    }

    pub fn from_yaml(yaml: &str) -> PolicyResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> PolicyResult<Self> {
        if !path.exists() {
            return Err(PolicyError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Process-wide selection policy, immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct ProviderPolicy {
    /// Providers never considered by the cheapest meta-providers.
    pub global_exclusions: BTreeSet<Provider>,
    /// Tie-break order: earlier is preferred.
    pub priority_order: Vec<Provider>,
    /// Percentage discounts per provider, 0-100.
    pub discounts: BTreeMap<Provider, f64>,
    /// Regional cost multipliers keyed by universal location token.
    pub region_cost_factors: BTreeMap<String, f64>,
    /// Per-provider cost multipliers (e.g. on-prem amortization overhead).
    pub provider_cost_factors: BTreeMap<Provider, f64>,
}

impl ProviderPolicy {
    /// Build a policy from defaults and an explicit set of environment
    /// pairs. Tests inject synthetic environments here; production callers
    /// use [`ProviderPolicy::from_env`].
    pub fn build<I, K, V>(defaults: PolicyDefaults, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut policy = Self {
            global_exclusions: defaults.exclude_from_cheapest.into_iter().collect(),
            priority_order: defaults.priority_order,
            discounts: defaults.provider_discounts,
            region_cost_factors: defaults.regional_cost_factors,
            provider_cost_factors: defaults.provider_cost_factors,
        };

        for (key, value) in env {
            let key = key.as_ref();
            let value = value.as_ref();

            if key == EXCLUDE_VAR {
                policy.apply_exclusions(value);
            } else if let Some(suffix) = key.strip_prefix(DISCOUNT_PREFIX) {
                policy.apply_discount(suffix, value);
            }
        }

        policy
    }

    /// Build a policy from defaults and the process environment. This is
    /// the only place in the workspace that reads environment variables.
    pub fn from_env(defaults: PolicyDefaults) -> Self {
        Self::build(defaults, std::env::vars())
    }

    fn apply_exclusions(&mut self, value: &str) {
        for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match Provider::from_str(name) {
                Some(provider) => {
                    debug!("Excluding provider {} via {}", provider, EXCLUDE_VAR);
                    self.global_exclusions.insert(provider);
                }
                None => warn!("Ignoring unknown provider '{}' in {}", name, EXCLUDE_VAR),
            }
        }
    }

    /// Apply one `YAMLFORGE_DISCOUNT_<PROVIDER>` override. Malformed values
    /// are logged and ignored; the static discount stays in effect.
    fn apply_discount(&mut self, provider_suffix: &str, value: &str) {
        let Some(provider) = Provider::from_str(&provider_suffix.to_lowercase()) else {
            warn!(
                "Ignoring discount for unknown provider '{}'",
                provider_suffix
            );
            return;
        };

        match value.parse::<f64>() {
            Ok(pct) if (0.0..=100.0).contains(&pct) => {
                debug!("Discount override for {}: {}%", provider, pct);
                self.discounts.insert(provider, pct);
            }
            _ => warn!(
                "Invalid discount '{}' for {} (expected 0-100), keeping configured value",
                value, provider
            ),
        }
    }

    /// Resolved discount percentage for a provider (0 when unset).
    pub fn discount_pct(&self, provider: Provider) -> f64 {
        self.discounts.get(&provider).copied().unwrap_or(0.0)
    }

    /// Regional multiplier for a universal location token (1.0 when unset
    /// or when the request has no location).
    pub fn region_cost_factor(&self, region: Option<&str>) -> f64 {
        region
            .and_then(|r| self.region_cost_factors.get(r))
            .copied()
            .unwrap_or(1.0)
    }

    /// Provider multiplier (1.0 when unset).
    pub fn provider_cost_factor(&self, provider: Provider) -> f64 {
        self.provider_cost_factors
            .get(&provider)
            .copied()
            .unwrap_or(1.0)
    }

    /// Position in the tie-break order. Providers absent from the list sort
    /// after every listed provider.
    pub fn priority_index(&self, provider: Provider) -> usize {
        self.priority_order
            .iter()
            .position(|p| *p == provider)
            .unwrap_or(usize::MAX)
    }
}
