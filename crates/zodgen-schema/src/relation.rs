//! # Relation Compiler
//!
//! For an entity with relation fields, builds:
//!
//! - `Complete<Entity>Input`, extending the base schema's input shape with
//!   one property per relation typed as the target's `Complete…Input`;
//! - `Complete<Entity>Output`, the same over the output shape;
//! - the relation-aware schema constant, typed
//!   `z.ZodSchema<Output, z.ZodTypeDef, Input>`.
//!
//! ## Cycle safety
//!
//! Entities may reference each other in cycles of any length, including
//! themselves. The relation-aware constant's initializer is always an
//! [`Expr::Lazy`] around `base.extend({...})`, so no relation-aware
//! identifier (its own or another unit's) is evaluated while modules are
//! initializing. Relation-aware identifiers appear only inside that lazy
//! body.

use zodgen_core::{Config, Entity, Field};

use crate::decl::{CommentStyle, ConstDecl, Expr, InterfaceDecl, InterfaceProperty, Statement};
use crate::field::{FieldCompiler, FieldOptions, RelationNaming};
use crate::naming::ModelNames;

/// Builds relation artifacts for one run.
#[derive(Debug, Clone)]
pub struct RelationCompiler<'a> {
    config: &'a Config,
    names: &'a ModelNames,
    fields: FieldCompiler<'a>,
}

impl<'a> RelationCompiler<'a> {
    pub fn new(config: &'a Config, names: &'a ModelNames) -> Self {
        Self {
            config,
            names,
            fields: FieldCompiler::new(FieldOptions::from_config(config), names),
        }
    }

    /// Whether `entity` gets relation artifacts under this config.
    pub fn applies_to(&self, entity: &Entity) -> bool {
        self.config.relation_model.is_enabled() && entity.has_relations()
    }

    /// Input shape, output shape, and the lazily evaluated relation-aware schema.
    pub fn build(&self, entity: &Entity) -> Vec<Statement> {
        let base = self.names.base_name(&entity.name);
        let related = self.names.related_name(&entity.name);
        let input = self.names.complete_input(&entity.name);
        let output = self.names.complete_output(&entity.name);

        let mut statements = vec![
            Statement::Interface(InterfaceDecl {
                name: input.clone(),
                extends: vec![format!("z.input<typeof {base}>")],
                properties: self.shape_properties(entity, |t| self.names.complete_input(t)),
            }),
            Statement::Interface(InterfaceDecl {
                name: output.clone(),
                extends: vec![format!("z.infer<typeof {base}>")],
                properties: self.shape_properties(entity, |t| self.names.complete_output(t)),
            }),
            Statement::Comment {
                style: CommentStyle::Block,
                lines: vec![
                    "/**".to_string(),
                    format!(
                        " * {related} contains all relations on your model in addition to the scalars"
                    ),
                    " *".to_string(),
                    " * NOTE: Lazy required in case of potential circular dependencies within schema"
                        .to_string(),
                    " */".to_string(),
                ],
            },
        ];

        if self.config.ignore_relation_types {
            statements.push(Statement::line_comment("@ts-ignore"));
        }

        let properties = entity
            .relation_fields()
            .map(|field| self.fields.property(field, RelationNaming::RelationAware))
            .collect();

        statements.push(Statement::Const(ConstDecl {
            exported: true,
            name: related,
            ty: Some(format!("z.ZodSchema<{output}, z.ZodTypeDef, {input}>")),
            init: Expr::lazy(Expr::Extend { base, properties }),
            docs: Vec::new(),
        }));

        statements
    }

    fn shape_properties(
        &self,
        entity: &Entity,
        companion: impl Fn(&str) -> String,
    ) -> Vec<InterfaceProperty> {
        entity
            .relation_fields()
            .filter_map(|field| {
                let target = field.relation_target()?;
                Some(InterfaceProperty {
                    name: field.name.clone(),
                    optional: !field.is_required,
                    ty: shape_type(field, &companion(target)),
                })
            })
            .collect()
    }
}

fn shape_type(field: &Field, companion: &str) -> String {
    let mut ty = companion.to_string();
    if field.is_list {
        ty.push_str("[]");
    }
    if !field.is_required {
        ty.push_str(" | null");
    }
    ty
}
