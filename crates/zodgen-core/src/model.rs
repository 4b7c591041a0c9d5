//! # Data Model — Entities, Fields, Enums
//!
//! The declarative model the compiler consumes, deserialized from the
//! upstream datamodel document (`{ "models": [...], "enums": [...] }`).
//!
//! ## Invariant
//!
//! A field is exactly one of scalar, enum, or relation. The raw descriptor
//! carries a free-form `kind` string plus a `type` name; it is converted to
//! [`FieldKind`] at deserialization time so that every consumer matches on
//! a closed sum type instead of re-checking strings.
//!
//! Relation edges are not stored: every [`FieldKind::Relation`] on entity
//! A naming entity B is an edge A→B. Self-edges and cycles are valid.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::extension;
use crate::error::{ModelError, ZodgenError};

/// Primitive type tag of a scalar field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    BigInt,
    Float,
    Decimal,
    Boolean,
    DateTime,
    Json,
    Bytes,
    /// A type with no validator mapping, carrying its upstream name.
    Unsupported(String),
}

impl ScalarType {
    /// Map an upstream type name to its tag.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "String" => Self::String,
            "Int" => Self::Int,
            "BigInt" => Self::BigInt,
            "Float" => Self::Float,
            "Decimal" => Self::Decimal,
            "Boolean" => Self::Boolean,
            "DateTime" => Self::DateTime,
            "Json" => Self::Json,
            "Bytes" => Self::Bytes,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// The upstream type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::BigInt => "BigInt",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Json => "Json",
            Self::Bytes => "Bytes",
            Self::Unsupported(name) => name,
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarType),
    /// Value of the named enum.
    Enum(String),
    /// Instance(s) of the named entity.
    Relation(String),
}

impl FieldKind {
    /// The upstream `type` name: scalar tag, enum name, or target entity.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar(scalar) => scalar.as_str(),
            Self::Enum(name) | Self::Relation(name) => name,
        }
    }

    fn as_kind_str(&self) -> &'static str {
        match self {
            Self::Scalar(ScalarType::Unsupported(_)) => "unsupported",
            Self::Scalar(_) => "scalar",
            Self::Enum(_) => "enum",
            Self::Relation(_) => "object",
        }
    }
}

/// One field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub is_list: bool,
    pub is_required: bool,
    /// Free-form documentation; may carry `@zod` directives.
    pub documentation: Option<String>,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_list: false,
            is_required: true,
            documentation: None,
        }
    }

    /// A required, non-list scalar field.
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(scalar))
    }

    /// A required, non-list enum field.
    pub fn enumeration(name: impl Into<String>, enum_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Enum(enum_name.into()))
    }

    /// A required, to-one relation field.
    pub fn relation(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Relation(target.into()))
    }

    /// Mark the field as a list.
    #[must_use]
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark the field as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    /// Attach documentation.
    #[must_use]
    pub fn documented(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation(_))
    }

    /// Target entity name, for relation fields.
    pub fn relation_target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Relation(target) => Some(target),
            _ => None,
        }
    }

    /// Enum name, for enum fields.
    pub fn enum_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Enum(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_scalar(&self, scalar: &ScalarType) -> bool {
        matches!(&self.kind, FieldKind::Scalar(s) if s == scalar)
    }
}

/// Field descriptor as written by the upstream model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    kind: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    is_list: bool,
    #[serde(default = "default_required")]
    is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    documentation: Option<String>,
}

fn default_required() -> bool {
    true
}

impl TryFrom<RawField> for Field {
    type Error = ModelError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "scalar" => FieldKind::Scalar(ScalarType::from_type_name(&raw.type_name)),
            "unsupported" => FieldKind::Scalar(ScalarType::Unsupported(raw.type_name)),
            "enum" => FieldKind::Enum(raw.type_name),
            "object" => FieldKind::Relation(raw.type_name),
            other => {
                return Err(ModelError::UnknownFieldKind {
                    field: raw.name,
                    kind: other.to_string(),
                })
            }
        };
        Ok(Self {
            name: raw.name,
            kind,
            is_list: raw.is_list,
            is_required: raw.is_required,
            documentation: raw.documentation,
        })
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        Self {
            kind: field.kind.as_kind_str().to_string(),
            type_name: field.kind.type_name().to_string(),
            name: field.name,
            is_list: field.is_list,
            is_required: field.is_required,
            documentation: field.documentation,
        }
    }
}

/// A named record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            documentation: None,
        }
    }

    /// Fields compiled into the base schema (everything but relations).
    pub fn scalar_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_relation())
    }

    /// Relation fields, in declaration order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn has_relations(&self) -> bool {
        self.fields.iter().any(Field::is_relation)
    }

    /// Whether any field is the given scalar type.
    pub fn uses_scalar(&self, scalar: &ScalarType) -> bool {
        self.fields.iter().any(|f| f.is_scalar(scalar))
    }

    /// Distinct enum names referenced by this entity, sorted.
    pub fn enum_names(&self) -> BTreeSet<&str> {
        self.fields.iter().filter_map(Field::enum_name).collect()
    }

    /// Distinct relation targets other than this entity, sorted.
    pub fn foreign_relation_targets(&self) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter_map(Field::relation_target)
            .filter(|target| *target != self.name)
            .collect()
    }
}

/// One member of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
}

impl EnumValue {
    /// The value sent over the wire: the database name when mapped.
    pub fn wire_value(&self) -> &str {
        self.db_name.as_deref().unwrap_or(&self.name)
    }
}

/// A named, ordered set of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// The whole model handed over for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    #[serde(rename = "models")]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl DataModel {
    pub fn new(entities: Vec<Entity>, enums: Vec<Enum>) -> Self {
        Self { entities, enums }
    }

    /// Parse a JSON datamodel document.
    pub fn from_json_str(source: &str) -> Result<Self, ZodgenError> {
        let model: Self =
            serde_json::from_str(source).map_err(|e| ZodgenError::Serialization(e.to_string()))?;
        model.check_unique_names()?;
        Ok(model)
    }

    /// Parse a YAML datamodel document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ZodgenError> {
        let model: Self =
            serde_yaml::from_str(source).map_err(|e| ZodgenError::Serialization(e.to_string()))?;
        model.check_unique_names()?;
        Ok(model)
    }

    /// Load a datamodel file; `.yaml`/`.yml` are YAML, anything else JSON.
    pub fn load(path: &Path) -> Result<Self, ZodgenError> {
        let content = std::fs::read_to_string(path)?;
        match extension(path).as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    fn check_unique_names(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(ModelError::DuplicateEntity(entity.name.clone()));
            }
        }
        let mut seen = BTreeSet::new();
        for enumeration in &self.enums {
            if !seen.insert(enumeration.name.as_str()) {
                return Err(ModelError::DuplicateEnum(enumeration.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATAMODEL: &str = r#"{
        "models": [
            {
                "name": "User",
                "fields": [
                    { "name": "id", "kind": "scalar", "type": "String", "isList": false, "isRequired": true },
                    { "name": "role", "kind": "enum", "type": "Role", "isList": false, "isRequired": true },
                    { "name": "posts", "kind": "object", "type": "Post", "isList": true, "isRequired": true },
                    { "name": "blob", "kind": "scalar", "type": "Geometry", "isList": false, "isRequired": false,
                      "documentation": "raw geometry" }
                ]
            },
            {
                "name": "Post",
                "documentation": "A blog post",
                "fields": [
                    { "name": "author", "kind": "object", "type": "User", "isList": false, "isRequired": true }
                ]
            }
        ],
        "enums": [
            { "name": "Role", "values": [ { "name": "ADMIN", "dbName": "admin" }, { "name": "USER" } ] }
        ]
    }"#;

    #[test]
    fn datamodel_parses_into_typed_kinds() {
        let model = DataModel::from_json_str(DATAMODEL).unwrap();
        let user = model.entity("User").unwrap();
        assert_eq!(user.fields[0].kind, FieldKind::Scalar(ScalarType::String));
        assert_eq!(user.fields[1].kind, FieldKind::Enum("Role".to_string()));
        assert_eq!(user.fields[2].kind, FieldKind::Relation("Post".to_string()));
        assert!(user.fields[2].is_list);
        assert_eq!(
            user.fields[3].kind,
            FieldKind::Scalar(ScalarType::Unsupported("Geometry".to_string()))
        );
        assert_eq!(user.fields[3].documentation.as_deref(), Some("raw geometry"));
        assert_eq!(
            model.entity("Post").unwrap().documentation.as_deref(),
            Some("A blog post")
        );
    }

    #[test]
    fn enum_wire_value_prefers_db_name() {
        let model = DataModel::from_json_str(DATAMODEL).unwrap();
        let role = model.enumeration("Role").unwrap();
        assert_eq!(role.values[0].wire_value(), "admin");
        assert_eq!(role.values[1].wire_value(), "USER");
    }

    #[test]
    fn unknown_field_kind_is_rejected() {
        let source = r#"{ "models": [ { "name": "A", "fields": [
            { "name": "x", "kind": "mystery", "type": "String", "isList": false, "isRequired": true }
        ] } ] }"#;
        let err = DataModel::from_json_str(source).unwrap_err();
        assert!(err.to_string().contains("unknown kind"), "got: {err}");
    }

    #[test]
    fn duplicate_entities_are_rejected() {
        let source = r#"{ "models": [
            { "name": "A", "fields": [] },
            { "name": "A", "fields": [] }
        ] }"#;
        let err = DataModel::from_json_str(source).unwrap_err();
        assert!(matches!(
            err,
            ZodgenError::Model(ModelError::DuplicateEntity(name)) if name == "A"
        ));
    }

    #[test]
    fn yaml_datamodel_is_accepted() {
        let source = r#"
models:
  - name: Tag
    fields:
      - { name: label, kind: scalar, type: String, isList: false, isRequired: true }
"#;
        let model = DataModel::from_yaml_str(source).unwrap();
        assert_eq!(model.entities[0].fields[0].name, "label");
        assert!(model.enums.is_empty());
    }

    #[test]
    fn foreign_targets_exclude_self_and_dedupe() {
        let entity = Entity::new(
            "Comment",
            vec![
                Field::relation("parent", "Comment").optional(),
                Field::relation("children", "Comment").list(),
                Field::relation("author", "User"),
                Field::relation("editor", "User").optional(),
            ],
        );
        let targets: Vec<_> = entity.foreign_relation_targets().into_iter().collect();
        assert_eq!(targets, vec!["User"]);
        assert_eq!(entity.relation_fields().count(), 4);
        assert_eq!(entity.scalar_fields().count(), 0);
    }

    #[test]
    fn field_round_trips_through_raw_descriptor() {
        let field = Field::enumeration("status", "Status").optional().list();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "enum");
        assert_eq!(json["type"], "Status");
        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }
}
