//! # Unit Orchestration
//!
//! Drives every compiler stage for one run and assembles the compilation
//! units: one per entity, an optional enum unit, and the barrel.
//!
//! ## Model unit stages
//!
//! An entity unit walks a fixed sequence of [`UnitStage`]s. Each stage
//! emits its declarations (or nothing, when it does not apply) and the
//! walk never returns to an earlier stage:
//!
//! ```text
//! Start → ImportsEmitted → JsonHelperEmitted → DecimalHelperEmitted
//!       → BaseSchemaEmitted → RelationArtifactsEmitted → Done
//! ```
//!
//! Units are independent: an entity's unit refers to other entities only
//! by name, so a failing unit never affects the others.

use zodgen_core::{Config, DataModel, Entity, Enum, FileLayout, ScalarType};

use crate::decl::{CompilationUnit, ConstDecl, Expr, Statement};
use crate::directive::FieldDocs;
use crate::error::CompileError;
use crate::field::{FieldCompiler, FieldOptions, RelationNaming};
use crate::helpers::{decimal_helper, json_helper};
use crate::imports::ImportResolver;
use crate::naming::ModelNames;
use crate::relation::RelationCompiler;

/// File name of the barrel unit.
pub const BARREL_FILE: &str = "index";

/// Progress of one entity unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitStage {
    Start,
    ImportsEmitted,
    JsonHelperEmitted,
    DecimalHelperEmitted,
    BaseSchemaEmitted,
    RelationArtifactsEmitted,
    Done,
}

impl UnitStage {
    /// The stage after this one; `None` once done.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::ImportsEmitted),
            Self::ImportsEmitted => Some(Self::JsonHelperEmitted),
            Self::JsonHelperEmitted => Some(Self::DecimalHelperEmitted),
            Self::DecimalHelperEmitted => Some(Self::BaseSchemaEmitted),
            Self::BaseSchemaEmitted => Some(Self::RelationArtifactsEmitted),
            Self::RelationArtifactsEmitted => Some(Self::Done),
            Self::Done => None,
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Entity units in model order, then the enum unit, then the barrel.
    pub units: Vec<CompilationUnit>,
    /// Entities whose unit could not be compiled.
    pub failures: Vec<CompileError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds units for one run; holds only read-only inputs.
#[derive(Debug, Clone)]
pub struct UnitCompiler<'a> {
    config: &'a Config,
    names: ModelNames,
    layout: &'a FileLayout,
}

impl<'a> UnitCompiler<'a> {
    pub fn new(config: &'a Config, layout: &'a FileLayout) -> Self {
        Self {
            config,
            names: ModelNames::new(config),
            layout,
        }
    }

    pub fn names(&self) -> &ModelNames {
        &self.names
    }

    /// File name (without extension) of `entity`'s unit.
    pub fn model_file_name(&self, entity: &str) -> String {
        self.config.file_name_case.apply(entity)
    }

    /// Compile one entity into its unit.
    pub fn populate_model_unit(
        &self,
        entity: &Entity,
        model: &DataModel,
    ) -> Result<CompilationUnit, CompileError> {
        let mut unit = CompilationUnit::new(self.model_file_name(&entity.name));
        let fields = FieldCompiler::new(FieldOptions::from_config(self.config), &self.names);
        let relations = RelationCompiler::new(self.config, &self.names);

        let mut stage = UnitStage::Start;
        while let Some(next) = stage.next() {
            match next {
                UnitStage::ImportsEmitted => {
                    unit.imports = ImportResolver::new(self.config, self.layout, &self.names)
                        .resolve(entity, model)?;
                }
                UnitStage::JsonHelperEmitted => {
                    if entity.uses_scalar(&ScalarType::Json) {
                        unit.statements
                            .extend(json_helper(self.config.prisma_json_nullability));
                    }
                }
                UnitStage::DecimalHelperEmitted => {
                    if self.config.use_decimal_js && entity.uses_scalar(&ScalarType::Decimal) {
                        unit.statements.extend(decimal_helper());
                    }
                }
                UnitStage::BaseSchemaEmitted => {
                    let properties = entity
                        .scalar_fields()
                        .map(|field| fields.property(field, RelationNaming::Base))
                        .collect();
                    unit.statements.push(Statement::Const(ConstDecl {
                        exported: true,
                        name: self.names.base_name(&entity.name),
                        ty: None,
                        init: Expr::Object(properties),
                        docs: FieldDocs::parse(entity.documentation.as_deref()).jsdoc(),
                    }));
                }
                UnitStage::RelationArtifactsEmitted => {
                    if relations.applies_to(entity) {
                        unit.statements.extend(relations.build(entity));
                    }
                }
                UnitStage::Start | UnitStage::Done => {}
            }
            tracing::trace!(entity = %entity.name, stage = ?next, "unit stage");
            stage = next;
        }

        tracing::debug!(
            entity = %entity.name,
            imports = unit.imports.len(),
            statements = unit.statements.len(),
            "compiled model unit"
        );
        Ok(unit)
    }

    /// One `as const` object per enum, in declaration order.
    pub fn populate_enum_unit(&self, file_name: &str, enums: &[Enum]) -> CompilationUnit {
        let mut unit = CompilationUnit::new(file_name);
        for enumeration in enums {
            let entries = enumeration
                .values
                .iter()
                .map(|value| (value.name.clone(), value.wire_value().to_string()))
                .collect();
            unit.statements.push(Statement::Const(ConstDecl {
                exported: true,
                name: enumeration.name.clone(),
                ty: None,
                init: Expr::ConstObject(entries),
                docs: FieldDocs::parse(enumeration.documentation.as_deref()).jsdoc(),
            }));
        }
        tracing::debug!(file = file_name, enums = enums.len(), "compiled enum unit");
        unit
    }

    /// Re-export every given entity unit, then the enum unit if configured.
    pub fn populate_barrel_unit<'e>(
        &self,
        entities: impl IntoIterator<Item = &'e Entity>,
    ) -> CompilationUnit {
        let mut unit = CompilationUnit::new(BARREL_FILE);
        for entity in entities {
            unit.statements.push(Statement::ExportAll {
                module: format!("./{}", self.model_file_name(&entity.name)),
            });
        }
        if let Some(enum_file) = &self.config.enum_file {
            unit.statements.push(Statement::ExportAll {
                module: format!("./{enum_file}"),
            });
        }
        unit
    }
}

/// Compile the whole model.
///
/// Failing entities are reported and left out of the barrel; every other
/// unit is still produced.
pub fn generate(model: &DataModel, config: &Config, layout: &FileLayout) -> GenerationReport {
    let compiler = UnitCompiler::new(config, layout);
    let mut report = GenerationReport::default();
    let mut compiled = Vec::with_capacity(model.entities.len());

    for entity in &model.entities {
        match compiler.populate_model_unit(entity, model) {
            Ok(unit) => {
                report.units.push(unit);
                compiled.push(entity);
            }
            Err(err) => {
                tracing::error!(entity = %entity.name, error = %err, "unit failed");
                report.failures.push(err);
            }
        }
    }

    if let Some(enum_file) = &config.enum_file {
        report
            .units
            .push(compiler.populate_enum_unit(enum_file, &model.enums));
    }
    report.units.push(compiler.populate_barrel_unit(compiled));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use zodgen_core::{Casing, EnumValue, Field, RelationModel};

    fn layout() -> FileLayout {
        FileLayout::new("/repo/prisma/schema.prisma", "/repo/prisma/zod", "/repo/prisma/.client")
    }

    fn declared(unit: &CompilationUnit) -> Vec<&str> {
        unit.statements.iter().filter_map(Statement::declared_name).collect()
    }

    #[test]
    fn stages_advance_without_returning() {
        let mut stage = UnitStage::Start;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(stage, UnitStage::Done);
    }

    #[test]
    fn scalar_entity_has_only_base_schema() {
        let user = Entity::new("User", vec![Field::scalar("id", ScalarType::String)]);
        let model = DataModel::new(vec![user.clone()], vec![]);
        let config = Config::default();
        let layout = layout();
        let unit = UnitCompiler::new(&config, &layout)
            .populate_model_unit(&user, &model)
            .unwrap();
        assert_eq!(unit.file_name, "User");
        assert_eq!(declared(&unit), vec!["UserModel"]);
        assert_eq!(unit.imports.len(), 1);
    }

    #[test]
    fn helpers_precede_base_schema_and_appear_once() {
        let doc = Entity::new(
            "Doc",
            vec![
                Field::scalar("meta", ScalarType::Json).optional(),
                Field::scalar("extra", ScalarType::Json),
                Field::scalar("price", ScalarType::Decimal),
            ],
        );
        let model = DataModel::new(vec![doc.clone()], vec![]);
        let config = Config {
            use_decimal_js: true,
            ..Config::default()
        };
        let layout = layout();
        let unit = UnitCompiler::new(&config, &layout)
            .populate_model_unit(&doc, &model)
            .unwrap();
        assert_eq!(
            declared(&unit),
            vec!["Literal", "Json", "literalSchema", "jsonSchema", "decimalSchema", "DocModel"]
        );
    }

    #[test]
    fn relation_artifacts_follow_base_schema() {
        let user = Entity::new("User", vec![Field::scalar("id", ScalarType::String)]);
        let post = Entity::new(
            "Post",
            vec![Field::scalar("id", ScalarType::Int), Field::relation("author", "User")],
        );
        let model = DataModel::new(vec![user, post.clone()], vec![]);
        let config = Config::default();
        let layout = layout();
        let unit = UnitCompiler::new(&config, &layout)
            .populate_model_unit(&post, &model)
            .unwrap();
        assert_eq!(
            declared(&unit),
            vec!["PostModel", "CompletePostInput", "CompletePostOutput", "RelatedPostModel"]
        );
        let base = unit.find_const("PostModel").unwrap();
        let Expr::Object(properties) = &base.init else {
            panic!("base schema is an object");
        };
        assert_eq!(properties.len(), 1, "relations stay out of the base schema");
    }

    #[test]
    fn entity_documentation_becomes_jsdoc() {
        let mut user = Entity::new("User", vec![Field::scalar("id", ScalarType::String)]);
        user.documentation = Some("An account holder".into());
        let model = DataModel::new(vec![user.clone()], vec![]);
        let config = Config::default();
        let layout = layout();
        let unit = UnitCompiler::new(&config, &layout)
            .populate_model_unit(&user, &model)
            .unwrap();
        assert_eq!(
            unit.find_const("UserModel").unwrap().docs,
            vec!["/**", " * An account holder", " */"]
        );
    }

    #[test]
    fn file_names_follow_case_option() {
        let config = Config {
            file_name_case: Casing::Snake,
            ..Config::default()
        };
        let layout = layout();
        let compiler = UnitCompiler::new(&config, &layout);
        assert_eq!(compiler.model_file_name("UserProfile"), "user_profile");
        let barrel = compiler.populate_barrel_unit(&[Entity::new("UserProfile", vec![])]);
        assert_eq!(
            barrel.statements,
            vec![Statement::ExportAll {
                module: "./user_profile".into()
            }]
        );
    }

    #[test]
    fn enum_unit_uses_database_names() {
        let config = Config::default();
        let layout = layout();
        let unit = UnitCompiler::new(&config, &layout).populate_enum_unit(
            "enums",
            &[Enum {
                name: "Role".into(),
                values: vec![
                    EnumValue {
                        name: "ADMIN".into(),
                        db_name: Some("admin".into()),
                    },
                    EnumValue {
                        name: "USER".into(),
                        db_name: None,
                    },
                ],
                documentation: None,
            }],
        );
        assert_eq!(
            unit.find_const("Role").unwrap().init,
            Expr::ConstObject(vec![
                ("ADMIN".into(), "admin".into()),
                ("USER".into(), "USER".into()),
            ])
        );
    }

    #[test]
    fn failing_unit_does_not_stop_the_run() {
        let user = Entity::new("User", vec![Field::scalar("id", ScalarType::String)]);
        let post = Entity::new("Post", vec![Field::relation("author", "Writer")]);
        let model = DataModel::new(vec![post, user], vec![]);
        let config = Config {
            enum_file: Some("enums".into()),
            ..Config::default()
        };
        let report = generate(&model, &config, &layout());

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].entity(), "Post");
        let files: Vec<_> = report.units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(files, vec!["User", "enums", "index"]);
        let barrel = report.units.last().unwrap();
        assert_eq!(
            barrel.statements,
            vec![
                Statement::ExportAll {
                    module: "./User".into()
                },
                Statement::ExportAll {
                    module: "./enums".into()
                },
            ]
        );
    }

    #[test]
    fn disabled_mode_emits_no_relation_artifacts() {
        let user = Entity::new("User", vec![Field::relation("posts", "Post").list()]);
        let post = Entity::new("Post", vec![Field::relation("author", "User")]);
        let model = DataModel::new(vec![user, post], vec![]);
        let config = Config {
            relation_model: RelationModel::Disabled,
            ..Config::default()
        };
        let report = generate(&model, &config, &layout());
        for unit in &report.units {
            assert!(unit.statements.iter().all(|s| !matches!(s, Statement::Interface(_))));
        }
    }
}
