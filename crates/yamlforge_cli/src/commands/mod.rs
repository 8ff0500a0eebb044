//! CLI command definitions.
//!
//! Each subcommand maps to one pass over the infrastructure config: convert
//! emits Terraform for the cheapest resolution, analyze reports the ranked
//! cost comparison without writing anything, discover recommends a size
//! tier for raw constraints.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use yamlforge_catalog::{FlavorCatalog, LocationMap};
use yamlforge_policy::{PolicyDefaults, ProviderPolicy};

pub mod analyze;
pub mod convert;
pub mod discover;

/// yamlforge - provider-agnostic YAML to cost-optimized Terraform
#[derive(Parser)]
#[command(name = "yamlforge")]
#[command(version, about = "yamlforge - provider-agnostic YAML to cost-optimized Terraform")]
#[command(long_about = r#"
yamlforge converts a provider-agnostic YAML infrastructure description into
provider-specific Terraform, resolving `cheapest` and `cheapest-gpu`
meta-providers against per-provider flavor catalogs.

WORKFLOWS:
  convert   → Resolve every instance and emit Terraform
  analyze   → Print the ranked cost comparison per instance
  discover  → Recommend the closest size tier for raw constraints

ENVIRONMENT:
  YAMLFORGE_DISCOUNT_<PROVIDER>   Percent discount override (0-100)
  YAMLFORGE_EXCLUDE_PROVIDERS     Comma-separated exclusion list

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or config
  3 - Selection failure
  5 - Terraform emission error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve instances and emit Terraform configuration
    Convert(convert::ConvertArgs),

    /// Print ranked cost comparisons without emitting anything
    Analyze(analyze::AnalyzeArgs),

    /// Recommend the closest size tier for cores/memory constraints
    Discover(discover::DiscoverArgs),
}

/// Catalog, location table, and policy shared by every subcommand.
pub struct Environment {
    pub catalog: FlavorCatalog,
    pub locations: LocationMap,
    pub policy: ProviderPolicy,
}

/// Load the shared environment: embedded data by default, a user data
/// directory or defaults file when given. Policy construction is the only
/// place environment variables are read.
pub fn load_environment(
    data_dir: Option<&PathBuf>,
    defaults_file: Option<&PathBuf>,
) -> anyhow::Result<Environment> {
    let catalog = match data_dir {
        Some(dir) => FlavorCatalog::from_dir(dir)
            .with_context(|| format!("loading catalog from {:?}", dir))?,
        None => FlavorCatalog::builtin().context("loading built-in catalog")?,
    };

    let defaults = match defaults_file {
        Some(path) => PolicyDefaults::from_file(path)
            .with_context(|| format!("loading policy defaults from {:?}", path))?,
        None => PolicyDefaults::builtin().context("loading built-in policy defaults")?,
    };

    Ok(Environment {
        catalog,
        locations: LocationMap::builtin().context("loading location table")?,
        policy: ProviderPolicy::from_env(defaults),
    })
}
