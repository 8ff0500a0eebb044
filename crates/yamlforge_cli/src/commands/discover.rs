//! Discover command: recommend the closest size tier for raw constraints.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use yamlforge_select::find_best_size_tier;
use yamlforge_spec::GpuSpec;

use super::load_environment;

#[derive(Args)]
pub struct DiscoverArgs {
    /// Minimum number of vCPU cores
    #[arg(long)]
    pub cores: u32,

    /// Minimum memory in MB
    #[arg(long)]
    pub memory: u32,

    /// Minimum number of GPUs
    #[arg(long)]
    pub gpu_count: Option<u32>,

    /// Requested GPU type ("NVIDIA T4" or short form "T4")
    #[arg(long, requires = "gpu_count")]
    pub gpu_type: Option<String>,

    /// Consider GPU-bearing tiers even without a GPU request
    #[arg(long)]
    pub allow_gpu_tiers: bool,

    /// Directory of catalog data files overriding the built-in catalog
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub fn execute(args: DiscoverArgs) -> anyhow::Result<()> {
    let env = load_environment(args.data_dir.as_ref(), None)?;

    let gpu_spec = args.gpu_count.map(|count| GpuSpec {
        count,
        gpu_type: args.gpu_type.clone(),
    });

    let recommendation = find_best_size_tier(
        args.cores,
        args.memory,
        gpu_spec.as_ref(),
        args.allow_gpu_tiers,
        &env.catalog,
    )
    .context("no size tier satisfies the constraints")?;

    println!("Recommended tier: {}", recommendation.tier);
    println!(
        "  avg specs: {:.1} vCPUs / {:.1} GB / {:.1} GPUs",
        recommendation.specs.avg_vcpus,
        recommendation.specs.avg_memory_gb,
        recommendation.specs.avg_gpu_count
    );
    println!(
        "  offered by: {}",
        recommendation
            .providers
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
