//! Infrastructure config reading.
//!
//! Parses the user's provider-agnostic YAML into validated
//! [`InstanceRequest`] values. Schema-level validation stays here; the
//! selection engine only re-checks its own numeric invariants.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{SpecError, SpecResult};
use crate::models::{GpuSpec, InstanceRequest, SizeSpec};
use crate::provider::{Provider, RequestedProvider};

/// Raw instance entry as written in the YAML config.
#[derive(Debug, Deserialize)]
struct RawInstance {
    name: String,
    provider: RequestedProvider,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    cores: Option<u32>,
    #[serde(default)]
    memory: Option<u32>,
    #[serde(default)]
    gpu_count: Option<u32>,
    #[serde(default)]
    gpu_type: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    exclude_providers: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    providers: Option<Vec<String>>,
    instances: Vec<RawInstance>,
}

/// A parsed infrastructure config: the enabled provider set and the
/// validated instance requests.
#[derive(Debug, Clone)]
pub struct InfraConfig {
    pub enabled_providers: BTreeSet<Provider>,
    pub instances: Vec<InstanceRequest>,
}

/// Reader for infrastructure config files.
pub struct ConfigReader;

impl ConfigReader {
    /// Read and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> SpecResult<InfraConfig> {
        let path = path.as_ref();
        debug!("Reading config from {:?}", path);

        if !path.exists() {
            return Err(SpecError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> SpecResult<InfraConfig> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;

        let enabled_providers = match raw.providers {
            Some(names) => {
                let mut set = BTreeSet::new();
                for name in names {
                    let provider = Provider::from_str(&name)
                        .ok_or_else(|| SpecError::UnknownProvider(name.clone()))?;
                    set.insert(provider);
                }
                set
            }
            None => Provider::all().into_iter().collect(),
        };

        let mut seen = BTreeSet::new();
        let mut instances = Vec::with_capacity(raw.instances.len());
        for raw_instance in raw.instances {
            if !seen.insert(raw_instance.name.clone()) {
                return Err(SpecError::DuplicateInstance(raw_instance.name));
            }
            instances.push(Self::build_request(raw_instance)?);
        }

        Ok(InfraConfig { enabled_providers, instances })
    }

    fn build_request(raw: RawInstance) -> SpecResult<InstanceRequest> {
        let size_spec = match (raw.size, raw.cores, raw.memory) {
            (Some(tier), None, None) => SizeSpec::NamedSize { tier },
            (None, Some(cores), Some(memory_mb)) => SizeSpec::ExactSpec { cores, memory_mb },
            (Some(_), _, _) => {
                return Err(SpecError::InvalidRequestSpec {
                    instance: raw.name,
                    message: "size and cores/memory are mutually exclusive".to_string(),
                })
            }
            (None, _, _) => {
                return Err(SpecError::InvalidRequestSpec {
                    instance: raw.name,
                    message: "either size or both cores and memory are required".to_string(),
                })
            }
        };

        let gpu_spec = match (raw.gpu_count, raw.gpu_type) {
            (Some(count), gpu_type) => Some(GpuSpec { count, gpu_type }),
            (None, Some(_)) => {
                return Err(SpecError::InvalidRequestSpec {
                    instance: raw.name,
                    message: "gpu_type requires gpu_count".to_string(),
                })
            }
            (None, None) => None,
        };

        let mut request = InstanceRequest::new(raw.name, raw.provider, size_spec, gpu_spec)?;

        if let Some(location) = raw.location {
            request = request.with_location(location);
        }

        if let Some(names) = raw.exclude_providers {
            let mut exclusions = BTreeSet::new();
            for name in names {
                let provider = Provider::from_str(&name)
                    .ok_or_else(|| SpecError::UnknownProvider(name.clone()))?;
                exclusions.insert(provider);
            }
            request = request.with_exclusions(exclusions);
        }

        Ok(request)
    }
}
