//! CLI command definitions.
//!
//! This module defines the command structure for the archer CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod app_package;

/// archer - build, release and operate containerized applications
#[derive(Parser)]
#[command(name = "archer")]
#[command(version, about = "archer - build, release and operate containerized applications")]
#[command(long_about = r#"
archer turns the applications of a workspace into infrastructure stacks that
can be deployed to the environments of a project.

COMMANDS:
  app package  → Print or write the stack template of an application

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Manifest error
  4 - Template error
  5 - Store error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Name of the project (defaults to the workspace's project)
    #[arg(long, global = true, env = "ARCHER_PROJECT")]
    pub project: Option<String>,

    /// Directory holding environment records (defaults to <workspace>/.archer)
    #[arg(long, global = true, env = "ARCHER_STORE_DIR")]
    pub store_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with the applications of the workspace
    App(AppArgs),
}

#[derive(Args)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Subcommand)]
pub enum AppCommands {
    /// Prints the AWS CloudFormation template of an application
    Package(app_package::PackageAppArgs),
}
