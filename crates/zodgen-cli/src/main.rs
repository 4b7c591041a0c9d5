//! # zodgen CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zodgen_cli::config::{run_config, ConfigArgs};
use zodgen_cli::generate::{run_generate, GenerateArgs};
use zodgen_cli::manifest::run_manifest;

/// zodgen: compile a data model into zod validator modules.
#[derive(Parser, Debug)]
#[command(name = "zodgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the data model and write one module per unit.
    Generate(GenerateArgs),

    /// Print the resolved generator config as YAML.
    Config(ConfigArgs),

    /// Print the generator manifest as JSON.
    Manifest,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("zodgen v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Config(args) => run_config(&args),
        Commands::Manifest => run_manifest(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
