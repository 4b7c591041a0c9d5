//! # Generate Subcommand
//!
//! Loads the data model and config, compiles every unit, renders each to
//! TypeScript, and writes `<unit>.ts` files into the output directory.
//! Units that fail to compile are logged and skipped; the command then
//! exits with code 1 after writing everything else.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use zodgen_core::{DataModel, FileLayout};
use zodgen_schema::{generate, render_unit, RenderOptions};

/// Upstream client module used when `--client-path` is not given.
pub const DEFAULT_CLIENT_PATH: &str = "node_modules/.prisma/client";

/// Arguments for the `zodgen generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Data-model document (JSON, or YAML by extension).
    #[arg(long, value_name = "FILE")]
    pub datamodel: PathBuf,

    /// Generator config (YAML or JSON). Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory receiving the generated modules.
    #[arg(long, short, value_name = "DIR")]
    pub output: PathBuf,

    /// Upstream client module enum types are imported from.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CLIENT_PATH)]
    pub client_path: PathBuf,

    /// Schema source file the `imports` option is relative to.
    /// Defaults to the data-model file.
    #[arg(long, value_name = "FILE")]
    pub schema_path: Option<PathBuf>,

    /// Print rendered modules instead of writing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the generate subcommand.
///
/// Returns exit code: 0 when every unit compiled, 1 otherwise.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    let model = DataModel::load(&args.datamodel)
        .with_context(|| format!("failed to load data model: {}", args.datamodel.display()))?;
    let config = crate::load_config(args.config.as_deref())?;

    let layout = FileLayout::new(
        args.schema_path.clone().unwrap_or_else(|| args.datamodel.clone()),
        args.output.clone(),
        args.client_path.clone(),
    );

    tracing::info!(
        entities = model.entities.len(),
        enums = model.enums.len(),
        output = %args.output.display(),
        "generating"
    );

    let report = generate(&model, &config, &layout);
    let options = RenderOptions::from_config(&config);

    if !args.dry_run {
        std::fs::create_dir_all(&args.output).with_context(|| {
            format!("failed to create output directory: {}", args.output.display())
        })?;
    }

    for unit in &report.units {
        let text = render_unit(unit, &options);
        let path = unit_path(&args.output, &unit.file_name);
        if args.dry_run {
            println!("// {}\n{text}", path.display());
        } else {
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote unit");
        }
    }

    if report.is_success() {
        Ok(0)
    } else {
        for failure in &report.failures {
            eprintln!("error: {failure}");
        }
        Ok(1)
    }
}

fn unit_path(output: &Path, file_name: &str) -> PathBuf {
    output.join(format!("{file_name}.ts"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATAMODEL: &str = r#"{
        "models": [
            {
                "name": "User",
                "fields": [
                    { "name": "id", "kind": "scalar", "type": "String", "isList": false, "isRequired": true },
                    { "name": "role", "kind": "enum", "type": "Role", "isList": false, "isRequired": true },
                    { "name": "posts", "kind": "object", "type": "Post", "isList": true, "isRequired": true }
                ]
            },
            {
                "name": "Post",
                "fields": [
                    { "name": "id", "kind": "scalar", "type": "Int", "isList": false, "isRequired": true },
                    { "name": "author", "kind": "object", "type": "User", "isList": false, "isRequired": false }
                ]
            }
        ],
        "enums": [
            { "name": "Role", "values": [{ "name": "ADMIN" }, { "name": "USER" }] }
        ]
    }"#;

    fn args(dir: &Path, config: Option<PathBuf>) -> GenerateArgs {
        let datamodel = dir.join("dmmf.json");
        std::fs::write(&datamodel, DATAMODEL).unwrap();
        GenerateArgs {
            datamodel,
            config,
            output: dir.join("zod"),
            client_path: dir.join("node_modules/.prisma/client"),
            schema_path: None,
            dry_run: false,
        }
    }

    #[test]
    fn writes_one_file_per_unit() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("zodgen.yaml");
        std::fs::write(&config, "enumFile: enums\nsingleQuote: \"true\"\n").unwrap();

        let code = run_generate(&args(dir.path(), Some(config))).unwrap();
        assert_eq!(code, 0);

        let out = dir.path().join("zod");
        for name in ["User.ts", "Post.ts", "enums.ts", "index.ts"] {
            assert!(out.join(name).is_file(), "missing {name}");
        }
        let index = std::fs::read_to_string(out.join("index.ts")).unwrap();
        assert_eq!(
            index,
            "export * from './User';\nexport * from './Post';\nexport * from './enums';\n"
        );
        let user = std::fs::read_to_string(out.join("User.ts")).unwrap();
        assert!(user.contains("import { Role } from './enums';"));
        assert!(user.contains("posts: RelatedPostModel.array(),"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), None);
        args.dry_run = true;
        assert_eq!(run_generate(&args).unwrap(), 0);
        assert!(!dir.path().join("zod").exists());
    }

    #[test]
    fn unresolved_relation_exits_nonzero_but_writes_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let datamodel = dir.path().join("dmmf.json");
        std::fs::write(
            &datamodel,
            r#"{ "models": [
                { "name": "User", "fields": [
                    { "name": "id", "kind": "scalar", "type": "String" } ] },
                { "name": "Post", "fields": [
                    { "name": "author", "kind": "object", "type": "Writer" } ] }
            ] }"#,
        )
        .unwrap();
        let args = GenerateArgs {
            datamodel,
            config: None,
            output: dir.path().join("zod"),
            client_path: PathBuf::from(DEFAULT_CLIENT_PATH),
            schema_path: None,
            dry_run: false,
        };
        assert_eq!(run_generate(&args).unwrap(), 1);
        assert!(dir.path().join("zod/User.ts").is_file());
        assert!(!dir.path().join("zod/Post.ts").exists());
    }

    #[test]
    fn missing_datamodel_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenerateArgs {
            datamodel: dir.path().join("absent.json"),
            config: None,
            output: dir.path().join("zod"),
            client_path: PathBuf::from(DEFAULT_CLIENT_PATH),
            schema_path: None,
            dry_run: false,
        };
        let err = run_generate(&args).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
