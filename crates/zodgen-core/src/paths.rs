//! # File Layout and Module Specifiers
//!
//! Generated units import each other and the user's modules by relative
//! specifier. Specifiers are derived lexically from the [`FileLayout`]:
//! no path is canonicalized against the file system, so the same layout
//! always yields the same specifiers.

use std::path::{Component, Path, PathBuf};

/// Where the generator reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    /// The data-model source file; user import paths resolve against its directory.
    pub schema_path: PathBuf,
    /// Directory receiving generated units.
    pub output_path: PathBuf,
    /// Upstream client-type module that exports enum types.
    pub client_path: PathBuf,
}

impl FileLayout {
    pub fn new(
        schema_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        client_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            schema_path: schema_path.into(),
            output_path: output_path.into(),
            client_path: client_path.into(),
        }
    }

    /// Specifier for a path given relative to the schema file's directory.
    pub fn schema_relative_specifier(&self, path: &str) -> String {
        let schema_dir = self.schema_path.parent().unwrap_or_else(|| Path::new(""));
        let target = normalize(&schema_dir.join(path));
        dot_slash(&relative(&self.output_path, &target))
    }

    /// Specifier of the upstream client module.
    pub fn client_specifier(&self) -> String {
        dot_slash(&relative(&self.output_path, &self.client_path))
    }
}

/// Resolve `.` and `..` components without touching the file system.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Path from directory `from` to `to`, both taken lexically.
pub fn relative(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);
    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_parts.len() {
        out.push("..");
    }
    for part in &to_parts[common..] {
        out.push(part);
    }
    out
}

/// Turn a relative path into an import specifier.
///
/// Separators become `/`; anything under `node_modules` collapses to the
/// package path; paths not already climbing with `../` get a `./` prefix.
pub fn dot_slash(path: &Path) -> String {
    let mut converted = path.to_string_lossy().replace('\\', "/");
    while converted.contains("//") {
        converted = converted.replace("//", "/");
    }

    if let Some(idx) = converted.rfind("/node_modules/") {
        return converted[idx + "/node_modules/".len()..].to_string();
    }
    if let Some(stripped) = converted.strip_prefix("node_modules/") {
        return stripped.to_string();
    }
    if converted.starts_with("../") || converted == ".." {
        return converted;
    }
    format!("./{converted}")
}
