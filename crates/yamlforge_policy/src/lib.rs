//! # yamlforge_policy
//!
//! The provider selection policy: global exclusions, tie-break priority
//! order, per-provider discounts, and regional/provider cost factors.
//!
//! Built once at startup from a static defaults file plus `YAMLFORGE_*`
//! environment overrides, then treated as read-only for the rest of the
//! run. All downstream selection logic is environment-agnostic.

pub mod error;
pub mod policy;

pub use error::{PolicyError, PolicyResult};
pub use policy::{PolicyDefaults, ProviderPolicy};
