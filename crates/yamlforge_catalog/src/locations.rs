//! Location normalization.
//!
//! Maps a universal location token ("us-east") to each provider's native
//! region identifier. Pure lookup, no decision logic.

use std::collections::BTreeMap;

use serde::Deserialize;

use yamlforge_spec::Provider;

use crate::error::CatalogResult;

const BUILTIN_LOCATIONS: &str = include_str!("../data/locations.yaml");

/// Universal location token → per-provider native regions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LocationMap {
    map: BTreeMap<String, BTreeMap<Provider, String>>,
}

impl LocationMap {
    /// Load the embedded default location table.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_yaml(BUILTIN_LOCATIONS)
    }

    pub fn from_yaml(yaml: &str) -> CatalogResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolve a universal token to a provider's native region.
    pub fn resolve(&self, location: &str, provider: Provider) -> Option<&str> {
        self.map
            .get(location)
            .and_then(|regions| regions.get(&provider))
            .map(String::as_str)
    }

    /// All universal tokens the table knows.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}
