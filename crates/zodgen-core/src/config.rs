//! # Generator Configuration
//!
//! The resolved option set consumed by every compiler component. A
//! [`Config`] is built once per run from a YAML or JSON document and is
//! never mutated afterwards.
//!
//! ## Format
//!
//! Keys are camelCase and every option has a default, so an empty
//! document is a valid configuration. Generator hosts hand options over
//! as strings, so boolean and numeric options accept both their native
//! form and a string spelling (`"true"`, `"4"`).

use std::path::Path;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::casing::Casing;
use crate::error::{ConfigError, ZodgenError};

/// How relation-aware schemas are generated and named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationModel {
    /// No relation-aware schemas; the base schema is the only one.
    Disabled,
    /// Both schemas generated; base is `FooModel`, relation-aware is
    /// `RelatedFooModel`, and base is the default import.
    #[default]
    Enabled,
    /// Both schemas generated; base is prefixed `_fooModel` and the
    /// relation-aware schema takes the plain name.
    Default,
}

impl RelationModel {
    /// Whether relation-aware schemas are produced at all.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "true" => Ok(Self::Enabled),
            "false" => Ok(Self::Disabled),
            "default" => Ok(Self::Default),
            other => Err(ConfigError::InvalidValue {
                option: "relationModel",
                value: other.to_string(),
                expected: "true, false, default",
            }),
        }
    }
}

impl Serialize for RelationModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Enabled => serializer.serialize_bool(true),
            Self::Default => serializer.serialize_str("default"),
        }
    }
}

impl<'de> Deserialize<'de> for RelationModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Lenient::deserialize(deserializer)? {
            Lenient::Bool(true) => Ok(Self::Enabled),
            Lenient::Bool(false) => Ok(Self::Disabled),
            Lenient::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            Lenient::Num(n) => Err(de::Error::custom(ConfigError::InvalidValue {
                option: "relationModel",
                value: n.to_string(),
                expected: "true, false, default",
            })),
        }
    }
}

/// Validator strategy for `DateTime` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeMode {
    /// `z.date()`
    #[default]
    Date,
    /// A date value or an ISO-8601 date-time string.
    Union,
    /// A date value converted to its ISO-8601 string, then validated.
    Transform,
}

/// Modifier appended to optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullableMode {
    /// Accepts `null` or absence.
    #[default]
    Nullish,
    /// Accepts `null`, rejects absence.
    Nullable,
}

impl NullableMode {
    /// The chain fragment appended for this mode.
    pub fn modifier(self) -> &'static str {
        match self {
            Self::Nullish => "nullish()",
            Self::Nullable => "nullable()",
        }
    }
}

/// Indentation unit used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentType {
    /// Spaces, `indentSize` per level.
    #[default]
    Space,
    /// One tab per level.
    Tab,
}

/// Statement terminator policy used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemicolonPreference {
    /// Terminate statements with `;`.
    #[default]
    Insert,
    /// Leave statements unterminated.
    Remove,
}

/// Resolved generator options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub relation_model: RelationModel,
    pub model_suffix: String,
    pub model_case: Casing,
    #[serde(deserialize_with = "lenient_bool")]
    pub use_decimal_js: bool,
    /// User helper module, relative to the schema file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<String>,
    /// When true the JSON helper leaves `null` out of its literal set.
    #[serde(deserialize_with = "lenient_bool")]
    pub prisma_json_nullability: bool,
    pub file_name_case: Casing,
    /// Name of the generated enum module, if enums get their own unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_file: Option<String>,
    /// External module specifier enum types are imported from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_import: Option<String>,
    #[serde(deserialize_with = "lenient_usize")]
    pub indent_size: usize,
    pub indent_type: IndentType,
    #[serde(deserialize_with = "lenient_bool")]
    pub single_quote: bool,
    pub semicolon: SemicolonPreference,
    #[serde(deserialize_with = "lenient_bool")]
    pub trailing_commas: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub ignore_relation_types: bool,
    pub date_time_schema: DateTimeMode,
    pub nullable_type: NullableMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relation_model: RelationModel::Enabled,
            model_suffix: "Model".to_string(),
            model_case: Casing::Pascal,
            use_decimal_js: false,
            imports: None,
            prisma_json_nullability: true,
            file_name_case: Casing::Pascal,
            enum_file: None,
            enum_import: None,
            indent_size: 2,
            indent_type: IndentType::Space,
            single_quote: false,
            semicolon: SemicolonPreference::Insert,
            trailing_commas: true,
            ignore_relation_types: false,
            date_time_schema: DateTimeMode::Date,
            nullable_type: NullableMode::Nullish,
        }
    }
}

impl Config {
    /// Parse a YAML configuration document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        // An empty YAML document deserializes as unit, not as an empty map.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ZodgenError> {
        let content = std::fs::read_to_string(path)?;
        let config = match extension(path).as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
            }
        };
        Ok(config)
    }

    /// Render the resolved configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ZodgenError> {
        serde_yaml::to_string(self).map_err(|e| ZodgenError::Serialization(e.to_string()))
    }
}

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Scalar accepted where the host may send either a native value or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Bool(bool),
    Num(u64),
    Str(String),
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Lenient::deserialize(deserializer)? {
        Lenient::Bool(b) => Ok(b),
        Lenient::Str(s) if s == "true" => Ok(true),
        Lenient::Str(s) if s == "false" => Ok(false),
        Lenient::Str(s) => Err(de::Error::custom(format!(
            "expected \"true\" or \"false\", got {s:?}"
        ))),
        Lenient::Num(n) => Err(de::Error::custom(format!("expected a boolean, got {n}"))),
    }
}

fn lenient_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    match Lenient::deserialize(deserializer)? {
        Lenient::Num(n) => usize::try_from(n).map_err(de::Error::custom),
        Lenient::Str(s) => s.trim().parse().map_err(de::Error::custom),
        Lenient::Bool(b) => Err(de::Error::custom(format!("expected a number, got {b}"))),
    }
}
