//! Errors raised while compiling a single unit.
//!
//! A unit that fails is skipped; the remaining units still compile.

use thiserror::Error;

/// A model-integrity defect found while compiling one entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A relation field names an entity absent from the model.
    #[error("entity `{entity}` field `{field}` relates to unknown entity `{target}`")]
    UnresolvedRelation {
        entity: String,
        field: String,
        target: String,
    },

    /// An enum field names an enum absent from the model.
    #[error("entity `{entity}` field `{field}` uses unknown enum `{enum_name}`")]
    UnresolvedEnum {
        entity: String,
        field: String,
        enum_name: String,
    },
}

impl CompileError {
    /// The entity whose unit failed.
    pub fn entity(&self) -> &str {
        match self {
            Self::UnresolvedRelation { entity, .. } | Self::UnresolvedEnum { entity, .. } => entity,
        }
    }
}
