//! # Manifest Subcommand
//!
//! Prints the generator manifest a host toolchain reads before generation.

use anyhow::{Context, Result};

use zodgen_schema::GeneratorManifest;

/// Execute the manifest subcommand.
pub fn run_manifest() -> Result<u8> {
    let json = GeneratorManifest::default()
        .to_json()
        .context("failed to serialize manifest")?;
    println!("{json}");
    Ok(0)
}
