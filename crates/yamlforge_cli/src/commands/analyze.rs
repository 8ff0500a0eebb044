//! Analyze command: ranked cost comparison per instance, no emission.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::error;

use yamlforge_select::{render_comparison, resolve_instance};
use yamlforge_spec::ConfigReader;

use super::load_environment;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Infrastructure config file (YAML)
    pub config: PathBuf,

    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Directory of catalog data files overriding the built-in catalog
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Policy defaults file overriding the built-in defaults
    #[arg(long)]
    pub defaults: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = ConfigReader::from_file(&args.config)
        .with_context(|| format!("reading config {:?}", args.config))?;
    let env = load_environment(args.data_dir.as_ref(), args.defaults.as_ref())?;

    let mut failures = 0usize;

    for request in &config.instances {
        match resolve_instance(request, &config.enabled_providers, &env.catalog, &env.policy) {
            Ok(selection) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&selection)?);
                } else {
                    print!("{}", render_comparison(&request.name, &selection));
                    println!();
                }
            }
            Err(e) => {
                error!("{}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} instance(s) failed to resolve", failures, config.instances.len());
    }

    Ok(())
}
