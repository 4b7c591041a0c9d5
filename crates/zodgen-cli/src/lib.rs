//! # zodgen-cli — Command-Line Driver for zodgen
//!
//! Provides the `zodgen` command-line interface around the compiler in
//! `zodgen-schema`.
//!
//! ## Subcommands
//!
//! - `zodgen generate` — compile a data model and write one module per
//!   entity, the enum module, and the barrel.
//! - `zodgen config` — print the fully resolved generator config.
//! - `zodgen manifest` — print the generator manifest as JSON.
//!
//! ```bash
//! zodgen generate --datamodel prisma/dmmf.json --config zodgen.yaml --output src/zod
//! zodgen -v generate --datamodel prisma/dmmf.json --output src/zod --dry-run
//! ```

pub mod config;
pub mod generate;
pub mod manifest;

use std::path::Path;

use anyhow::{Context, Result};
use zodgen_core::Config;

/// Load the generator config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn config_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zodgen.yaml");
        std::fs::write(&path, "relationModel: maybe\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("zodgen.yaml"), "{err:#}");
    }
}
