//! Generator manifest: the handshake reply a host toolchain asks for
//! before invoking generation.

use serde::{Deserialize, Serialize};

/// Default output directory, relative to the schema file.
pub const DEFAULT_OUTPUT: &str = "zod";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorManifest {
    pub version: String,
    pub pretty_name: String,
    pub default_output: String,
}

impl Default for GeneratorManifest {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            pretty_name: "Zod Schemas".to_string(),
            default_output: DEFAULT_OUTPUT.to_string(),
        }
    }
}

impl GeneratorManifest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
