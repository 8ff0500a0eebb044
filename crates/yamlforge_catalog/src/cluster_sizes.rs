//! OpenShift cluster-size tables.
//!
//! Maps a named cluster size to control-plane and worker counts plus the
//! size tiers those node groups request. Data only; the deployment
//! orchestration that consumes it lives outside this workspace.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::CatalogResult;

const BUILTIN_CLUSTER_SIZES: &str = include_str!("../data/cluster_sizes.yaml");

/// Node counts and tiers for one named cluster size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterSize {
    pub control_plane_count: u32,
    pub worker_count: u32,
    pub control_plane_tier: String,
    pub worker_tier: String,
}

/// Named cluster-size lookup table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ClusterSizes {
    map: BTreeMap<String, ClusterSize>,
}

impl ClusterSizes {
    /// Load the embedded default table.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_yaml(BUILTIN_CLUSTER_SIZES)
    }

    pub fn from_yaml(yaml: &str) -> CatalogResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn get(&self, name: &str) -> Option<&ClusterSize> {
        self.map.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}
