//! The flavor catalog.
//!
//! A flat index keyed by `(provider, tier)` holding every concrete instance
//! type the pricing data knows about. Built once at startup from static YAML
//! data files and read-only afterwards: tier lookup is O(1), exact-spec
//! matching is a full scan.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use yamlforge_spec::Provider;

use crate::error::{CatalogError, CatalogResult};
use crate::flavor::FlavorOption;
use crate::gpu::{canonical_gpu_type, gpu_types_match};

/// One flavor entry as written in the per-provider data files.
#[derive(Debug, Deserialize)]
struct RawFlavor {
    native_type: String,
    vcpus: u32,
    memory_gb: f64,
    hourly_cost: f64,
    #[serde(default = "default_cost_factor")]
    cost_factor: f64,
    #[serde(default)]
    gpu_count: u32,
    #[serde(default)]
    gpu_type: Option<String>,
}

fn default_cost_factor() -> f64 {
    1.0
}

/// A per-provider catalog data file.
#[derive(Debug, Deserialize)]
struct RawProviderCatalog {
    provider: String,
    flavors: BTreeMap<String, Vec<RawFlavor>>,
}

/// Embedded default catalog data, one file per provider.
const BUILTIN_DATA: &[&str] = &[
    include_str!("../data/aws.yaml"),
    include_str!("../data/azure.yaml"),
    include_str!("../data/gcp.yaml"),
    include_str!("../data/ibm_vpc.yaml"),
    include_str!("../data/ibm_classic.yaml"),
    include_str!("../data/oci.yaml"),
    include_str!("../data/alibaba.yaml"),
    include_str!("../data/vmware.yaml"),
    include_str!("../data/cnv.yaml"),
];

/// Read-only lookup table of every known flavor.
#[derive(Debug, Clone, Default)]
pub struct FlavorCatalog {
    index: BTreeMap<(Provider, String), Vec<FlavorOption>>,
}

impl FlavorCatalog {
    /// An empty catalog, used by tests to build synthetic pricing tables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog.
    pub fn builtin() -> CatalogResult<Self> {
        let mut catalog = Self::empty();
        for data in BUILTIN_DATA {
            catalog.load_yaml(data)?;
        }
        Ok(catalog)
    }

    /// Load every `*.yaml` provider file under a data directory.
    ///
    /// Files that fail to parse are skipped with a debug log, matching the
    /// loader behavior for optional user-supplied data overlays.
    pub fn from_dir(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(CatalogError::DataDirNotFound(path.to_path_buf()));
        }

        let mut catalog = Self::empty();
        for entry in WalkDir::new(path)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let file = entry.path();
            if file.is_file()
                && file.extension().map_or(false, |e| e == "yaml" || e == "yml")
            {
                let content = fs::read_to_string(file)?;
                if let Err(e) = catalog.load_yaml(&content) {
                    debug!("Skipping invalid catalog file {:?}: {}", file, e);
                }
            }
        }
        Ok(catalog)
    }

    /// Parse one per-provider YAML document into the index.
    pub fn load_yaml(&mut self, yaml: &str) -> CatalogResult<()> {
        let raw: RawProviderCatalog = serde_yaml::from_str(yaml)?;
        let provider = Provider::from_str(&raw.provider)
            .ok_or_else(|| CatalogError::UnknownProvider(raw.provider.clone()))?;

        for (tier, entries) in raw.flavors {
            for entry in entries {
                let flavor = FlavorOption {
                    provider,
                    size_tier: tier.clone(),
                    native_type_id: entry.native_type,
                    vcpus: entry.vcpus,
                    memory_gb: entry.memory_gb,
                    gpu_count: entry.gpu_count,
                    gpu_type: entry.gpu_type,
                    base_hourly_cost: entry.hourly_cost,
                    cost_factor: entry.cost_factor,
                };
                self.insert(flavor)?;
            }
        }
        Ok(())
    }

    /// Insert a validated flavor.
    pub fn insert(&mut self, flavor: FlavorOption) -> CatalogResult<()> {
        flavor.validate()?;
        self.index
            .entry((flavor.provider, flavor.size_tier.clone()))
            .or_default()
            .push(flavor);
        Ok(())
    }

    /// All flavors a provider offers for a tier. Missing tiers yield an
    /// empty slice, not an error: some tiers are provider-specific.
    pub fn lookup(&self, provider: Provider, tier: &str) -> &[FlavorOption] {
        self.index
            .get(&(provider, tier.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over every flavor in the catalog, in deterministic order.
    pub fn scan(&self) -> impl Iterator<Item = &FlavorOption> {
        self.index.values().flatten()
    }

    /// Iterate over one provider's flavors only.
    pub fn scan_provider(&self, provider: Provider) -> impl Iterator<Item = &FlavorOption> {
        self.index
            .range((provider, String::new())..)
            .take_while(move |((p, _), _)| *p == provider)
            .flat_map(|(_, flavors)| flavors.iter())
    }

    /// All tier names known across providers.
    pub fn tiers(&self) -> BTreeSet<&str> {
        self.index.keys().map(|(_, tier)| tier.as_str()).collect()
    }

    /// The providers offering a given tier.
    pub fn providers_with_tier(&self, tier: &str) -> BTreeSet<Provider> {
        self.index
            .keys()
            .filter(|(_, t)| t == tier)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Whether a provider has any GPU-capable flavor.
    pub fn provider_has_gpu(&self, provider: Provider) -> bool {
        self.scan_provider(provider).any(|f| f.gpu_count > 0)
    }

    /// Whether a provider offers a specific GPU type (synonym-aware).
    pub fn provider_has_gpu_type(&self, provider: Provider, gpu_type: &str) -> bool {
        self.scan_provider(provider).any(|f| {
            f.gpu_type
                .as_deref()
                .map_or(false, |t| gpu_types_match(gpu_type, t))
        })
    }

    /// Canonical names of every GPU type in the catalog, for diagnostics.
    pub fn known_gpu_types(&self) -> BTreeSet<String> {
        self.scan()
            .filter_map(|f| f.gpu_type.as_deref())
            .map(canonical_gpu_type)
            .collect()
    }

    /// Number of flavors loaded.
    pub fn len(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_lookup_and_missing_tier() {
        let mut catalog = FlavorCatalog::empty();
        catalog
            .insert(flavor(Provider::Aws, "medium", "t3.medium", 2, 4.0, 0.0416))
            .unwrap();

        assert_eq!(catalog.lookup(Provider::Aws, "medium").len(), 1);
        assert!(catalog.lookup(Provider::Aws, "xlarge").is_empty());
        assert!(catalog.lookup(Provider::Gcp, "medium").is_empty());
    }

    #[test]
    fn test_scan_provider_is_scoped() {
        let mut catalog = FlavorCatalog::empty();
        catalog
            .insert(flavor(Provider::Aws, "medium", "t3.medium", 2, 4.0, 0.0416))
            .unwrap();
        catalog
            .insert(flavor(Provider::Gcp, "medium", "e2-medium", 2, 4.0, 0.0335))
            .unwrap();
        catalog
            .insert(flavor(Provider::Aws, "large", "m5.large", 2, 8.0, 0.096))
            .unwrap();

        let aws: Vec<_> = catalog.scan_provider(Provider::Aws).collect();
        assert_eq!(aws.len(), 2);
        assert!(aws.iter().all(|f| f.provider == Provider::Aws));
    }

    #[test]
    fn test_gpu_capability_queries() {
        let mut catalog = FlavorCatalog::empty();
        let mut gpu = flavor(Provider::Aws, "gpu_t4_small", "g4dn.xlarge", 4, 16.0, 0.526);
        gpu.gpu_count = 1;
        gpu.gpu_type = Some("NVIDIA T4".to_string());
        catalog.insert(gpu).unwrap();
        catalog
            .insert(flavor(Provider::Gcp, "medium", "e2-medium", 2, 4.0, 0.0335))
            .unwrap();

        assert!(catalog.provider_has_gpu(Provider::Aws));
        assert!(!catalog.provider_has_gpu(Provider::Gcp));
        assert!(catalog.provider_has_gpu_type(Provider::Aws, "T4"));
        assert!(!catalog.provider_has_gpu_type(Provider::Aws, "A100"));
        assert_eq!(
            catalog.known_gpu_types().into_iter().collect::<Vec<_>>(),
            vec!["nvidia t4".to_string()]
        );
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = FlavorCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.lookup(Provider::Aws, "medium").is_empty());
        assert!(!catalog.lookup(Provider::Gcp, "medium").is_empty());
        assert!(catalog.provider_has_gpu_type(Provider::Aws, "AMD Radeon Pro V520"));
    }

    #[test]
    fn test_load_yaml_rejects_unknown_provider() {
        let mut catalog = FlavorCatalog::empty();
        let result = catalog.load_yaml("provider: skynet\nflavors: {}\n");
        assert!(matches!(result, Err(CatalogError::UnknownProvider(_))));
    }
}
