//! # yamlforge_catalog
//!
//! Static pricing and mapping data for yamlforge: the per-provider flavor
//! catalog, the universal-location → native-region table, the GPU type
//! synonym table, and the OpenShift cluster-size table.
//!
//! Everything here is loaded once at process start (embedded defaults, or a
//! user-supplied data directory) and treated as read-only for the remainder
//! of the run.

pub mod catalog;
pub mod cluster_sizes;
pub mod error;
pub mod flavor;
pub mod gpu;
pub mod locations;

pub use catalog::FlavorCatalog;
pub use cluster_sizes::{ClusterSize, ClusterSizes};
pub use error::{CatalogError, CatalogResult};
pub use flavor::FlavorOption;
pub use gpu::{canonical_gpu_type, gpu_types_match};
pub use locations::LocationMap;
