//! # zodgen-schema — Model-to-Validator Compiler
//!
//! Compiles a [`zodgen_core::DataModel`] into `zod` validator modules. The
//! compiler stops at an ordered declaration list per compilation unit;
//! [`render`] turns that list into TypeScript text.
//!
//! ## Pipeline
//!
//! - [`naming`] — identifiers of base and relation-aware schemas.
//! - [`directive`] — `@zod` documentation directives.
//! - [`field`] — one field to one validator expression.
//! - [`relation`] — companion input/output shapes and the lazily
//!   evaluated relation-aware schema.
//! - [`imports`] — the minimal, ordered import set of a unit.
//! - [`unit`] — per-unit stage sequence, enum and barrel units, and
//!   [`generate`] for a whole model.
//!
//! ## Determinism
//!
//! Every stage is a pure function of `(entity, model, Config, FileLayout)`.
//! Regenerating from the same inputs yields byte-identical output.
//!
//! ## Crate Policy
//!
//! - Depends only on `zodgen-core` internally.
//! - No file-system access; writing units is the caller's job.
//! - A unit that fails to compile is reported, never half-emitted.

pub mod decl;
pub mod directive;
pub mod error;
pub mod field;
pub mod helpers;
pub mod imports;
pub mod manifest;
pub mod naming;
pub mod relation;
pub mod render;
pub mod unit;

pub use decl::{
    CommentStyle, CompilationUnit, ConstDecl, Expr, ImportBinding, ImportDecl, InterfaceDecl,
    InterfaceProperty, Property, Statement, ValidatorExpr,
};
pub use directive::{Directive, FieldDocs};
pub use error::CompileError;
pub use field::{compile_field, FieldCompiler, FieldOptions, RelationNaming};
pub use imports::ImportResolver;
pub use manifest::GeneratorManifest;
pub use naming::ModelNames;
pub use relation::RelationCompiler;
pub use render::{render_unit, RenderOptions};
pub use unit::{generate, GenerationReport, UnitCompiler, UnitStage};
