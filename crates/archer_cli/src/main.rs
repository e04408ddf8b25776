//! archer CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Manifest error
//! - 4: Template error
//! - 5: Store error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use archer_deploy::DeployError;
use archer_manifest::ManifestError;
use archer_store::StoreError;

mod commands;
mod error;
mod prompt;

use commands::{AppArgs, AppCommands, Cli, Commands};
use error::PackageError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const MANIFEST_ERROR: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const STORE_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so a printed template stays clean on stdout
    let default_level = if cli.global.verbose {
        "archer=debug,warn"
    } else if cli.global.quiet {
        "archer=error,error"
    } else {
        "archer=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::App(AppArgs {
            command: AppCommands::Package(args),
        }) => commands::app_package::execute(args, &cli.global),
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
    for cause in e.chain() {
        if cause.downcast_ref::<PackageError>().is_some() {
            return ExitCodes::INVALID_ARGS;
        }
        if cause.downcast_ref::<ManifestError>().is_some() {
            return ExitCodes::MANIFEST_ERROR;
        }
        if cause.downcast_ref::<DeployError>().is_some() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if cause.downcast_ref::<StoreError>().is_some() {
            return ExitCodes::STORE_ERROR;
        }
    }
    ExitCodes::GENERAL_ERROR
}
