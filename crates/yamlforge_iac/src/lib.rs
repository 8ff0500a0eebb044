//! # yamlforge_iac
//!
//! Terraform emission for resolved selections: maps each winning
//! (provider, flavor, region) triple into provider-specific HCL blocks
//! and writes a self-contained configuration directory.
//!
//! This layer is purely mechanical; every decision was already made by
//! the selection engine.

pub mod blocks;
pub mod emitter;
pub mod error;

pub use emitter::{EmitInstance, TerraformEmitter};
pub use error::{IacError, IacResult};
