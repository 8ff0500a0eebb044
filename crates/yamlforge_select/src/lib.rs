//! # yamlforge_select
//!
//! The cost-optimized provider resolution engine behind the `cheapest`
//! and `cheapest-gpu` meta-providers.
//!
//! An instance request flows through the eligibility filter, the candidate
//! generator, the cost adjustment layer, and finally the selection engine,
//! which ranks candidates by adjusted hourly cost with explicit tie-break
//! rules. Everything is a pure function of (request, catalog, policy):
//! requests can be evaluated in any order, or in parallel by the caller,
//! with no shared mutable state.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use yamlforge_catalog::FlavorCatalog;
//! use yamlforge_policy::ProviderPolicy;
//! use yamlforge_select::resolve_instance;
//! use yamlforge_spec::{InstanceRequest, Provider, RequestedProvider, SizeSpec};
//!
//! let catalog = FlavorCatalog::builtin().unwrap();
//! let policy = ProviderPolicy::default();
//! let enabled: BTreeSet<Provider> = Provider::all().into_iter().collect();
//!
//! let request = InstanceRequest::new(
//!     "web-1",
//!     RequestedProvider::Cheapest,
//!     SizeSpec::NamedSize { tier: "medium".to_string() },
//!     None,
//! ).unwrap();
//!
//! let result = resolve_instance(&request, &enabled, &catalog, &policy).unwrap();
//! assert_eq!(result.winner, result.ranked_candidates[0]);
//! ```

pub mod candidates;
pub mod cost;
pub mod discovery;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod report;

pub use candidates::generate_candidates;
pub use cost::{adjust, AdjustedCandidate};
pub use discovery::{find_best_size_tier, TierRecommendation, TierSpecs};
pub use eligibility::{eligible_providers, EligibilityOutcome, ExclusionReason};
pub use engine::{resolve_instance, select, SelectionResult};
pub use error::{SelectError, SelectResult};
pub use report::render_comparison;
