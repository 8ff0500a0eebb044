//! Flavor records.

use serde::{Deserialize, Serialize};

use yamlforge_spec::Provider;

use crate::error::{CatalogError, CatalogResult};

/// One concrete instance type on one provider.
///
/// Static data: loaded once at process start and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorOption {
    /// Provider offering this flavor.
    pub provider: Provider,
    /// Abstract size tier this flavor satisfies (e.g. "medium").
    pub size_tier: String,
    /// Provider-native instance type id (e.g. "m5.large").
    pub native_type_id: String,
    pub vcpus: u32,
    /// Some providers report fractional GB.
    pub memory_gb: f64,
    #[serde(default)]
    pub gpu_count: u32,
    #[serde(default)]
    pub gpu_type: Option<String>,
    /// Raw hourly cost in USD, before any adjustment.
    pub base_hourly_cost: f64,
    /// Relative weight within the provider, informational.
    #[serde(default = "default_cost_factor")]
    pub cost_factor: f64,
}

fn default_cost_factor() -> f64 {
    1.0
}

impl FlavorOption {
    /// Validate the invariants catalog entries must hold.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.base_hourly_cost < 0.0 {
            return Err(CatalogError::InvalidFlavor {
                provider: self.provider.to_string(),
                native_type: self.native_type_id.clone(),
                message: "hourly cost must not be negative".to_string(),
            });
        }
        if self.gpu_count > 0 && self.gpu_type.is_none() {
            return Err(CatalogError::InvalidFlavor {
                provider: self.provider.to_string(),
                native_type: self.native_type_id.clone(),
                message: "gpu_count set without gpu_type".to_string(),
            });
        }
        Ok(())
    }

    /// Resource footprint used as the final selection tie-break.
    pub fn footprint(&self) -> f64 {
        self.vcpus as f64 * self.memory_gb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flavor(cost: f64, gpu_count: u32, gpu_type: Option<&str>) -> FlavorOption {
        FlavorOption {
            provider: Provider::Aws,
            size_tier: "medium".to_string(),
            native_type_id: "t3.medium".to_string(),
            vcpus: 2,
            memory_gb: 4.0,
            gpu_count,
            gpu_type: gpu_type.map(String::from),
            base_hourly_cost: cost,
            cost_factor: 1.0,
        }
    }

    #[test]
    fn test_valid_flavor() {
        assert!(flavor(0.0416, 0, None).validate().is_ok());
    }

    #[test]
    fn test_negative_cost_rejected() {
        assert!(flavor(-0.01, 0, None).validate().is_err());
    }

    #[test]
    fn test_gpu_count_without_type_rejected() {
        assert!(flavor(0.5, 1, None).validate().is_err());
        assert!(flavor(0.5, 1, Some("NVIDIA T4")).validate().is_ok());
    }

    #[test]
    fn test_footprint() {
        assert_eq!(flavor(0.1, 0, None).footprint(), 8.0);
    }
}
