//! # Import Resolver
//!
//! Computes the import declarations of one entity unit. Every unit imports
//! the validator root `z`. Beyond that, a unit imports only what its
//! declarations reference:
//!
//! - the user's helper module, as namespace `imports`, when a directive
//!   references `imports.`;
//! - `Decimal` from `decimal.js` when the decimal helper is emitted;
//! - each referenced enum type, from the generated enum module, the
//!   configured external enum module, or the upstream client module;
//! - the companion types and relation-aware schema of every *other*
//!   related entity, from the barrel module.
//!
//! ## Ordering
//!
//! The `zod` import always comes first. The remaining declarations are
//! sorted by module path, then by binding; symbols within a declaration are
//! sorted by name. The result depends only on which names are referenced,
//! never on field order.

use std::collections::BTreeSet;

use zodgen_core::{Config, DataModel, Entity, FieldKind, FileLayout, ScalarType};

use crate::decl::ImportDecl;
use crate::directive::{Directive, FieldDocs};
use crate::error::CompileError;
use crate::naming::ModelNames;

/// Validator library module.
pub const ZOD_MODULE: &str = "zod";

/// Module providing the `Decimal` type.
pub const DECIMAL_MODULE: &str = "decimal.js";

/// The barrel module, relative to any entity unit.
pub const BARREL_MODULE: &str = "./index";

/// Namespace alias of the user's helper module.
pub const IMPORTS_NAMESPACE: &str = "imports";

/// Resolves imports for one run.
#[derive(Debug, Clone)]
pub struct ImportResolver<'a> {
    config: &'a Config,
    layout: &'a FileLayout,
    names: &'a ModelNames,
}

impl<'a> ImportResolver<'a> {
    pub fn new(config: &'a Config, layout: &'a FileLayout, names: &'a ModelNames) -> Self {
        Self {
            config,
            layout,
            names,
        }
    }

    /// Imports for `entity`'s unit.
    ///
    /// Fails if a relation or enum field names something absent from `model`.
    pub fn resolve(
        &self,
        entity: &Entity,
        model: &DataModel,
    ) -> Result<Vec<ImportDecl>, CompileError> {
        check_references(entity, model)?;

        let mut imports = vec![ImportDecl::named(ZOD_MODULE, vec!["z".to_string()])];

        if let Some(path) = &self.config.imports {
            if references_namespace(entity) {
                imports.push(ImportDecl::namespace(
                    self.layout.schema_relative_specifier(path),
                    IMPORTS_NAMESPACE,
                ));
            }
        }

        if self.config.use_decimal_js && entity.uses_scalar(&ScalarType::Decimal) {
            imports.push(ImportDecl::named(DECIMAL_MODULE, vec!["Decimal".to_string()]));
        }

        let enums: Vec<String> = entity.enum_names().into_iter().map(String::from).collect();
        if !enums.is_empty() {
            imports.push(ImportDecl::named(self.enum_module(), enums));
        }

        if self.config.relation_model.is_enabled() {
            let symbols: BTreeSet<String> = entity
                .foreign_relation_targets()
                .into_iter()
                .flat_map(|target| {
                    [
                        self.names.complete_input(target),
                        self.names.complete_output(target),
                        self.names.related_name(target),
                    ]
                })
                .collect();
            if !symbols.is_empty() {
                imports.push(ImportDecl::named(BARREL_MODULE, symbols.into_iter().collect()));
            }
        }

        imports[1..].sort_by(|a, b| {
            a.module
                .cmp(&b.module)
                .then_with(|| a.binding.cmp(&b.binding))
        });
        Ok(imports)
    }

    /// Specifier enum types are imported from.
    pub fn enum_module(&self) -> String {
        if let Some(file) = &self.config.enum_file {
            format!("./{file}")
        } else if let Some(module) = &self.config.enum_import {
            module.clone()
        } else {
            self.layout.client_specifier()
        }
    }
}

fn check_references(entity: &Entity, model: &DataModel) -> Result<(), CompileError> {
    for field in &entity.fields {
        match &field.kind {
            FieldKind::Relation(target) if model.entity(target).is_none() => {
                return Err(CompileError::UnresolvedRelation {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                    target: target.clone(),
                });
            }
            FieldKind::Enum(name) if model.enumeration(name).is_none() => {
                return Err(CompileError::UnresolvedEnum {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                    enum_name: name.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn references_namespace(entity: &Entity) -> bool {
    let needle = format!("{IMPORTS_NAMESPACE}.");
    entity.fields.iter().any(|field| {
        FieldDocs::parse(field.documentation.as_deref())
            .directives
            .iter()
            .any(|directive| match directive {
                Directive::FullOverride(text) | Directive::ModifierAppend(text) => {
                    text.contains(&needle)
                }
            })
    })
}
