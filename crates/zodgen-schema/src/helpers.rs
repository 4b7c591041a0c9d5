//! Per-unit helper declarations shared by every field of a unit.

use crate::decl::{ConstDecl, Expr, Statement, ValidatorExpr};
use crate::field::{DECIMAL_SCHEMA, JSON_SCHEMA};

/// The recursive JSON helper: `Literal`/`Json` types plus `literalSchema`
/// and `jsonSchema`. `null` is part of the literal set unless
/// `disallow_null` is set.
pub fn json_helper(disallow_null: bool) -> Vec<Statement> {
    let (literal_ty, literal_schema) = if disallow_null {
        (
            "boolean | number | string",
            "z.union([z.string(), z.number(), z.boolean()])",
        )
    } else {
        (
            "boolean | number | string | null",
            "z.union([z.string(), z.number(), z.boolean(), z.null()])",
        )
    };

    vec![
        Statement::line_comment("Helper schema for JSON fields"),
        Statement::TypeAlias {
            exported: false,
            name: "Literal".to_string(),
            ty: literal_ty.to_string(),
        },
        Statement::TypeAlias {
            exported: false,
            name: "Json".to_string(),
            ty: "Literal | { [key: string]: Json } | Json[]".to_string(),
        },
        Statement::Const(ConstDecl {
            exported: false,
            name: "literalSchema".to_string(),
            ty: None,
            init: Expr::Validator(ValidatorExpr::new(literal_schema)),
            docs: Vec::new(),
        }),
        Statement::Const(ConstDecl {
            exported: false,
            name: JSON_SCHEMA.to_string(),
            ty: Some("z.ZodSchema<Json>".to_string()),
            init: Expr::lazy(Expr::Validator(ValidatorExpr::new(format!(
                "z.union([literalSchema, z.array({JSON_SCHEMA}), z.record({JSON_SCHEMA})])"
            )))),
            docs: Vec::new(),
        }),
    ]
}

/// Coercing decimal helper: accepts a `Decimal`, a numeric string, or a
/// number, rejects anything `Decimal` cannot parse, and yields a `Decimal`.
pub fn decimal_helper() -> Vec<Statement> {
    let chain = [
        (0, "z"),
        (1, ".instanceof(Decimal)"),
        (1, ".or(z.string())"),
        (1, ".or(z.number())"),
        (1, ".refine((value) => {"),
        (2, "try {"),
        (3, "return new Decimal(value)"),
        (2, "} catch (error) {"),
        (3, "return false"),
        (2, "}"),
        (1, "})"),
        (1, ".transform((value) => new Decimal(value))"),
    ];

    vec![
        Statement::line_comment("Helper schema for Decimal fields"),
        Statement::Const(ConstDecl {
            exported: false,
            name: DECIMAL_SCHEMA.to_string(),
            ty: None,
            init: Expr::Raw(
                chain
                    .into_iter()
                    .map(|(level, line)| (level, line.to_string()))
                    .collect(),
            ),
            docs: Vec::new(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_helper_declares_json_schema_once() {
        let statements = json_helper(true);
        let declared: Vec<_> = statements.iter().filter_map(Statement::declared_name).collect();
        assert_eq!(declared, vec!["Literal", "Json", "literalSchema", "jsonSchema"]);
    }

    #[test]
    fn json_null_policy_controls_literal_set() {
        let strict = format!("{:?}", json_helper(true));
        let lenient = format!("{:?}", json_helper(false));
        assert!(!strict.contains("z.null()"));
        assert!(lenient.contains("z.null()"));
        assert!(lenient.contains("string | null"));
    }

    #[test]
    fn json_schema_is_lazy() {
        let statements = json_helper(false);
        let Some(Statement::Const(decl)) = statements.last() else {
            panic!("json helper must end with the jsonSchema constant");
        };
        assert!(matches!(decl.init, Expr::Lazy(_)));
    }

    #[test]
    fn decimal_helper_coerces_into_decimal() {
        let statements = decimal_helper();
        let Some(Statement::Const(decl)) = statements.last() else {
            panic!("decimal helper must end with its constant");
        };
        assert_eq!(decl.name, "decimalSchema");
        let Expr::Raw(lines) = &decl.init else {
            panic!("decimal helper is raw source");
        };
        assert_eq!(lines[0], (0, "z".to_string()));
        assert_eq!(lines[1], (1, ".instanceof(Decimal)".to_string()));
        assert!(lines.iter().all(|(_, line)| !line.starts_with(' ')));
        assert_eq!(
            lines.last(),
            Some(&(1, ".transform((value) => new Decimal(value))".to_string()))
        );
    }
}
