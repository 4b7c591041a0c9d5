//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by every zodgen crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Configuration errors name the offending option and the rejected value.
//! - Model errors name the entity and field that could not be interpreted.
//! - Nothing here is retryable: every failure is a defect in the inputs.

use thiserror::Error;

/// Top-level error type for zodgen.
#[derive(Error, Debug)]
pub enum ZodgenError {
    /// Generator configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data model could not be interpreted.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error resolving a generator option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An option carried a value outside its accepted set.
    #[error("invalid value {value:?} for option `{option}`; expected one of: {expected}")]
    InvalidValue {
        /// The camelCase option key.
        option: &'static str,
        /// The rejected value as written.
        value: String,
        /// Human-readable list of accepted values.
        expected: &'static str,
    },

    /// The configuration document itself could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),

    /// The configuration file extension does not name a known format.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

/// Error interpreting the upstream data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A field descriptor carried an unknown `kind`.
    #[error("field `{field}` has unknown kind {kind:?}")]
    UnknownFieldKind {
        /// Field name.
        field: String,
        /// The kind as written.
        kind: String,
    },

    /// Two entities share a name.
    #[error("duplicate entity name `{0}`")]
    DuplicateEntity(String),

    /// Two enums share a name.
    #[error("duplicate enum name `{0}`")]
    DuplicateEnum(String),
}
