//! Data models for instance requests.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};
use crate::provider::{Provider, RequestedProvider};

/// How the requested machine size is expressed.
///
/// Exactly one form is present per request; the constructor enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSpec {
    /// An abstract size tier such as "medium" or "gpu_t4_small".
    NamedSize { tier: String },
    /// Explicit core and memory floors.
    ExactSpec { cores: u32, memory_mb: u32 },
}

/// GPU requirements attached to a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpec {
    /// Minimum number of GPUs (at least 1).
    pub count: u32,
    /// Requested GPU model, full name or short form ("NVIDIA T4", "T4").
    /// `None` means any GPU-capable flavor qualifies.
    #[serde(default)]
    pub gpu_type: Option<String>,
}

/// A normalized, validated instance request.
///
/// Constructed once from parsed input and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRequest {
    /// Unique name within a run.
    pub name: String,
    /// Concrete provider, or a `cheapest` meta-provider.
    pub provider: RequestedProvider,
    /// Size tier or explicit cores+memory (exactly one).
    pub size_spec: SizeSpec,
    /// Optional GPU floor.
    #[serde(default)]
    pub gpu_spec: Option<GpuSpec>,
    /// Universal location token (e.g. "us-east").
    #[serde(default)]
    pub location: Option<String>,
    /// Per-request exclusion override. When present (even empty) it
    /// replaces the global exclusion list for this request only.
    #[serde(default)]
    pub instance_exclusions: Option<BTreeSet<Provider>>,
}

impl InstanceRequest {
    /// Build a validated request.
    ///
    /// Enforces the invariants the selection engine relies on: exactly one
    /// size form, GPU count at least 1, and a GPU type only alongside a
    /// GPU count.
    pub fn new(
        name: impl Into<String>,
        provider: RequestedProvider,
        size_spec: SizeSpec,
        gpu_spec: Option<GpuSpec>,
    ) -> SpecResult<Self> {
        let name = name.into();

        if let SizeSpec::ExactSpec { cores, memory_mb } = &size_spec {
            if *cores == 0 || *memory_mb == 0 {
                return Err(SpecError::InvalidRequestSpec {
                    instance: name,
                    message: "cores and memory must be greater than zero".to_string(),
                });
            }
        }

        if let Some(gpu) = &gpu_spec {
            if gpu.count == 0 {
                return Err(SpecError::InvalidRequestSpec {
                    instance: name,
                    message: "gpu_count must be at least 1".to_string(),
                });
            }
        }

        Ok(Self {
            name,
            provider,
            size_spec,
            gpu_spec,
            location: None,
            instance_exclusions: None,
        })
    }

    /// Set the universal location token.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the per-request exclusion override.
    pub fn with_exclusions(mut self, exclusions: BTreeSet<Provider>) -> Self {
        self.instance_exclusions = Some(exclusions);
        self
    }

    /// Whether this request needs GPU-capable flavors, either through an
    /// explicit GPU spec or the `cheapest-gpu` meta-provider.
    pub fn wants_gpu(&self) -> bool {
        self.gpu_spec.is_some() || self.provider == RequestedProvider::CheapestGpu
    }
}
