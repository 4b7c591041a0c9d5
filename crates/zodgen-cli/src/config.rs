//! # Config Subcommand
//!
//! Prints the fully resolved generator config as YAML, defaults included.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the `zodgen config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Generator config (YAML or JSON). Prints the defaults when omitted.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Execute the config subcommand.
pub fn run_config(args: &ConfigArgs) -> Result<u8> {
    print!("{}", resolved_yaml(args)?);
    Ok(0)
}

fn resolved_yaml(args: &ConfigArgs) -> Result<String> {
    let config = crate::load_config(args.config.as_deref())?;
    config.to_yaml().context("failed to render config")
}
