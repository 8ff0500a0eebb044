//! yamlforge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or config
//! - 3: Selection failure (no eligible provider or flavor)
//! - 5: Terraform emission error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_CONFIG: u8 = 2;
    pub const SELECTION_FAILURE: u8 = 3;
    pub const IAC_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; --verbose and --quiet adjust the default level,
    // RUST_LOG still wins when set.
    let default_level = if cli.quiet {
        "yamlforge=error"
    } else if cli.verbose {
        "yamlforge=debug"
    } else {
        "yamlforge=info"
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Analyze(args) => commands::analyze::execute(args),
        Commands::Discover(args) => commands::discover::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("no eligible provider") || msg.contains("no flavor") {
        ExitCodes::SELECTION_FAILURE
    } else if msg.contains("terraform") || msg.contains("region mapping") {
        ExitCodes::IAC_ERROR
    } else if msg.contains("invalid") || msg.contains("not found") || msg.contains("duplicate") {
        ExitCodes::INVALID_CONFIG
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
