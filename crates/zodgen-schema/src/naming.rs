//! # Naming Strategy
//!
//! Maps an entity name to the identifiers of its generated artifacts. All
//! names are pure functions of `(entity name, Config)`; nothing is cached
//! or registered.
//!
//! | relation mode | base schema    | relation-aware schema |
//! |---------------|----------------|-----------------------|
//! | disabled      | `UserModel`    | (not generated)       |
//! | enabled       | `UserModel`    | `RelatedUserModel`    |
//! | default       | `_UserModel`   | `UserModel`           |
//!
//! The casing option applies to the name (including the `Related` prefix)
//! before the underscore prefix and the suffix are attached.

use zodgen_core::{Casing, Config, RelationModel};

/// Identifier builder for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelNames {
    casing: Casing,
    suffix: String,
    mode: RelationModel,
}

impl ModelNames {
    pub fn new(config: &Config) -> Self {
        Self {
            casing: config.model_case,
            suffix: config.model_suffix.clone(),
            mode: config.relation_model,
        }
    }

    fn format(&self, name: &str, prefix: &str) -> String {
        format!("{prefix}{}{}", self.casing.apply(name), self.suffix)
    }

    /// Identifier of the scalar-only schema.
    pub fn base_name(&self, entity: &str) -> String {
        match self.mode {
            RelationModel::Default => self.format(entity, "_"),
            RelationModel::Enabled | RelationModel::Disabled => self.format(entity, ""),
        }
    }

    /// Identifier of the relation-aware schema.
    pub fn related_name(&self, entity: &str) -> String {
        match self.mode {
            RelationModel::Default => self.format(entity, ""),
            RelationModel::Enabled | RelationModel::Disabled => {
                self.format(&format!("Related{entity}"), "")
            }
        }
    }

    /// Input shape of the relation-aware schema.
    pub fn complete_input(&self, entity: &str) -> String {
        format!("Complete{entity}Input")
    }

    /// Output shape of the relation-aware schema.
    pub fn complete_output(&self, entity: &str) -> String {
        format!("Complete{entity}Output")
    }

    /// The identifier other modules should import by default.
    pub fn default_export(&self, entity: &str) -> String {
        match self.mode {
            RelationModel::Default => self.related_name(entity),
            RelationModel::Enabled | RelationModel::Disabled => self.base_name(entity),
        }
    }
}
