//! # Identifier Casing
//!
//! The three casings a generator option can ask for. Entity names in the
//! upstream model are PascalCase by convention, so Pascal and camel casing
//! only touch the first character; snake casing re-splits the word
//! boundaries via `convert_case`.

use convert_case::{Case, Casing as _};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Identifier casing applied to entity names and file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Casing {
    /// `UserProfile`
    #[default]
    #[serde(rename = "PascalCase")]
    Pascal,
    /// `userProfile`
    #[serde(rename = "camelCase")]
    Camel,
    /// `user_profile`
    #[serde(rename = "snake_case")]
    Snake,
}

impl Casing {
    /// Apply this casing to `name`.
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Pascal => map_first(name, char::to_ascii_uppercase),
            Self::Camel => map_first(name, char::to_ascii_lowercase),
            Self::Snake => name.to_case(Case::Snake),
        }
    }

    /// The option spelling of this casing.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pascal => "PascalCase",
            Self::Camel => "camelCase",
            Self::Snake => "snake_case",
        }
    }
}

fn map_first(name: &str, f: fn(&char) -> char) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => std::iter::once(f(&first)).chain(chars).collect(),
        None => String::new(),
    }
}

impl std::fmt::Display for Casing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Casing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            other => Err(ConfigError::InvalidValue {
                option: "modelCase",
                value: other.to_string(),
                expected: "PascalCase, camelCase, snake_case",
            }),
        }
    }
}
