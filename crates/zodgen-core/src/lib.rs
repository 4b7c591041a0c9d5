//! # zodgen-core — Foundational Types for zodgen
//!
//! This crate defines everything the compiler reads: the data model
//! (entities, fields, enums), the resolved generator [`Config`], identifier
//! [`Casing`], and the [`FileLayout`] used to compute module specifiers.
//! Every other crate in the workspace depends on `zodgen-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed field kinds.** A field is `Scalar`, `Enum`, or `Relation`
//!    by construction ([`FieldKind`]). Raw descriptors are converted at the
//!    deserialization boundary.
//!
//! 2. **Immutable configuration.** [`Config`] is resolved once, with every
//!    option defaulted, and shared read-only by all compilation units.
//!
//! 3. **Lexical paths.** Module specifiers are pure functions of the
//!    layout; the file system is never consulted.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zodgen-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod casing;
pub mod config;
pub mod error;
pub mod model;
pub mod paths;

// Re-export primary types for ergonomic imports.
pub use casing::Casing;
pub use config::{
    Config, DateTimeMode, IndentType, NullableMode, RelationModel, SemicolonPreference,
};
pub use error::{ConfigError, ModelError, ZodgenError};
pub use model::{DataModel, Entity, Enum, EnumValue, Field, FieldKind, ScalarType};
pub use paths::{dot_slash, normalize, relative, FileLayout};
