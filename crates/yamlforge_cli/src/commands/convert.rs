//! Convert command: resolve every instance and emit Terraform.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{error, info};

use yamlforge_iac::{EmitInstance, TerraformEmitter};
use yamlforge_select::resolve_instance;
use yamlforge_spec::ConfigReader;

use super::load_environment;

#[derive(Args)]
pub struct ConvertArgs {
    /// Infrastructure config file (YAML)
    pub config: PathBuf,

    /// Output directory for the Terraform configuration
    #[arg(short, long, default_value = "./terraform")]
    pub output: PathBuf,

    /// Directory of catalog data files overriding the built-in catalog
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Policy defaults file overriding the built-in defaults
    #[arg(long)]
    pub defaults: Option<PathBuf>,
}

pub fn execute(args: ConvertArgs) -> anyhow::Result<()> {
    let config = ConfigReader::from_file(&args.config)
        .with_context(|| format!("reading config {:?}", args.config))?;
    let env = load_environment(args.data_dir.as_ref(), args.defaults.as_ref())?;

    let mut emit_instances = Vec::new();
    let mut failures = Vec::new();

    // Each instance resolves independently; one failure does not abort
    // the rest of the run.
    for request in &config.instances {
        match resolve_instance(request, &config.enabled_providers, &env.catalog, &env.policy) {
            Ok(selection) => {
                let instance = EmitInstance::from_selection(
                    &request.name,
                    &selection,
                    request.location.as_deref(),
                    &env.locations,
                )?;
                emit_instances.push(instance);
            }
            Err(e) => {
                error!("{}", e);
                failures.push(e);
            }
        }
    }

    if !emit_instances.is_empty() {
        TerraformEmitter::new(&args.output)
            .generate(&emit_instances)
            .context("emitting Terraform")?;
        info!(
            "Wrote {} instance(s) to {:?}",
            emit_instances.len(),
            args.output
        );
    }

    if !failures.is_empty() {
        bail!(
            "{} of {} instance(s) failed to resolve; first failure: {}",
            failures.len(),
            config.instances.len(),
            failures[0]
        );
    }

    Ok(())
}
