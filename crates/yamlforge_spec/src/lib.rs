//! # yamlforge_spec
//!
//! Input data model and config reading for yamlforge.
//!
//! This crate owns the provider enum, the normalized [`InstanceRequest`]
//! type, and the YAML config reader that turns a provider-agnostic
//! infrastructure description into validated requests for the selection
//! engine.
//!
//! ## Example
//!
//! ```rust
//! use yamlforge_spec::{ConfigReader, RequestedProvider};
//!
//! let config = ConfigReader::from_yaml(r#"
//! instances:
//!   - name: web-1
//!     provider: cheapest
//!     size: medium
//!     location: us-east
//! "#).unwrap();
//!
//! assert_eq!(config.instances[0].provider, RequestedProvider::Cheapest);
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod reader;

pub use error::{SpecError, SpecResult};
pub use models::{GpuSpec, InstanceRequest, SizeSpec};
pub use provider::{Provider, RequestedProvider};
pub use reader::{ConfigReader, InfraConfig};
