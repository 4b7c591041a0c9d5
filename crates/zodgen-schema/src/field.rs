//! # Field Compiler
//!
//! Maps one field descriptor to a validator expression. Precedence is
//! fixed:
//!
//! 1. base expression from the field kind and scalar type;
//! 2. a `custom(...)` directive replaces the base expression entirely;
//! 3. `array()` if the field is a list;
//! 4. directive chain fragments, in the order written;
//! 5. `nullable()` / `nullish()` if the field is optional and not `Json`.
//!
//! `Json` fields reference the unit's shared `jsonSchema` helper, which
//! encodes its own null policy, so they are never nullability-wrapped.
//! `Bytes` and unsupported scalars fall back to `z.unknown()`.

use zodgen_core::{Config, DateTimeMode, Field, FieldKind, NullableMode, ScalarType};

use crate::decl::{Property, ValidatorExpr};
use crate::directive::{Directive, FieldDocs};
use crate::naming::ModelNames;

/// Identifier of the per-unit JSON helper schema.
pub const JSON_SCHEMA: &str = "jsonSchema";

/// Identifier of the per-unit decimal helper schema.
pub const DECIMAL_SCHEMA: &str = "decimalSchema";

/// Validator emitted for types with no mapping.
pub const UNKNOWN_VALIDATOR: &str = "z.unknown()";

/// The config subset the field compiler reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOptions {
    pub date_time: DateTimeMode,
    pub nullable: NullableMode,
    pub decimal_js: bool,
}

impl FieldOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            date_time: config.date_time_schema,
            nullable: config.nullable_type,
            decimal_js: config.use_decimal_js,
        }
    }
}

/// Which schema of a relation target a relation field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationNaming {
    /// The target's scalar-only schema.
    Base,
    /// The target's relation-aware schema.
    RelationAware,
}

/// Compiles fields for one run.
#[derive(Debug, Clone)]
pub struct FieldCompiler<'a> {
    options: FieldOptions,
    names: &'a ModelNames,
}

impl<'a> FieldCompiler<'a> {
    pub fn new(options: FieldOptions, names: &'a ModelNames) -> Self {
        Self { options, names }
    }

    /// Compile a field to its validator expression.
    pub fn compile(&self, field: &Field, relation: RelationNaming) -> ValidatorExpr {
        let docs = FieldDocs::parse(field.documentation.as_deref());
        self.compile_with_docs(field, &docs, relation)
    }

    /// Compile a field into an object-schema entry, comment included.
    pub fn property(&self, field: &Field, relation: RelationNaming) -> Property {
        let docs = FieldDocs::parse(field.documentation.as_deref());
        Property {
            docs: docs.jsdoc(),
            name: field.name.clone(),
            value: self.compile_with_docs(field, &docs, relation),
        }
    }

    fn compile_with_docs(
        &self,
        field: &Field,
        docs: &FieldDocs,
        relation: RelationNaming,
    ) -> ValidatorExpr {
        let mut schema_override: Option<&str> = None;
        let mut appended: Vec<&str> = Vec::new();
        for directive in &docs.directives {
            match directive {
                Directive::FullOverride(expr) => {
                    schema_override.get_or_insert(expr.as_str());
                }
                Directive::ModifierAppend(fragment) => appended.push(fragment),
            }
        }

        let mut expr = match schema_override {
            Some(custom) => ValidatorExpr::new(custom),
            None => ValidatorExpr::new(self.base_expression(field, relation)),
        };

        if field.is_list {
            expr.push("array()");
        }
        for fragment in appended {
            expr.push(fragment);
        }
        if !field.is_required && !field.is_scalar(&ScalarType::Json) {
            expr.push(self.options.nullable.modifier());
        }
        expr
    }

    fn base_expression(&self, field: &Field, relation: RelationNaming) -> String {
        match &field.kind {
            FieldKind::Scalar(scalar) => self.scalar_expression(field, scalar),
            FieldKind::Enum(name) => format!("z.nativeEnum({name})"),
            FieldKind::Relation(target) => match relation {
                RelationNaming::RelationAware => self.names.related_name(target),
                RelationNaming::Base => self.names.base_name(target),
            },
        }
    }

    fn scalar_expression(&self, field: &Field, scalar: &ScalarType) -> String {
        let expr = match scalar {
            ScalarType::String => "z.string()",
            ScalarType::Int => "z.number().int()",
            ScalarType::BigInt => "z.bigint()",
            ScalarType::Float => "z.number()",
            ScalarType::Decimal if self.options.decimal_js => DECIMAL_SCHEMA,
            ScalarType::Decimal => "z.number()",
            ScalarType::Boolean => "z.boolean()",
            ScalarType::DateTime => match self.options.date_time {
                DateTimeMode::Date => "z.date()",
                DateTimeMode::Union => "z.union([z.date(), z.string().datetime()])",
                DateTimeMode::Transform => {
                    "z.date().transform((v) => v.toISOString()).pipe(z.string().datetime())"
                }
            },
            ScalarType::Json => JSON_SCHEMA,
            ScalarType::Bytes | ScalarType::Unsupported(_) => {
                tracing::warn!(
                    field = %field.name,
                    scalar = scalar.as_str(),
                    "no validator mapping; falling back to z.unknown()"
                );
                UNKNOWN_VALIDATOR
            }
        };
        expr.to_string()
    }
}

/// Compile one field without holding on to a [`FieldCompiler`].
pub fn compile_field(
    field: &Field,
    options: FieldOptions,
    names: &ModelNames,
    relation: RelationNaming,
) -> ValidatorExpr {
    FieldCompiler::new(options, names).compile(field, relation)
}
