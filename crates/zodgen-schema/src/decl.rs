//! # Declaration IR
//!
//! The ordered declaration list a compilation unit hands to the renderer.
//! The compiler decides *what* is declared; [`crate::render`] decides how
//! it is punctuated and indented.

use std::fmt;

/// A validator expression: a base followed by chain fragments.
///
/// Renders as `base.m1.m2`, e.g. `z.string().array().nullish()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatorExpr {
    base: String,
    modifiers: Vec<String>,
}

impl ValidatorExpr {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            modifiers: Vec::new(),
        }
    }

    /// Append a chain fragment such as `array()`.
    pub fn push(&mut self, modifier: impl Into<String>) {
        self.modifiers.push(modifier.into());
    }

    #[must_use]
    pub fn with(mut self, modifier: impl Into<String>) -> Self {
        self.push(modifier);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }
}

impl fmt::Display for ValidatorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for modifier in &self.modifiers {
            write!(f, ".{modifier}")?;
        }
        Ok(())
    }
}

/// One `name: validator` entry of an object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// JSDoc lines rendered above the entry.
    pub docs: Vec<String>,
    pub name: String,
    pub value: ValidatorExpr,
}

/// Constant initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Validator(ValidatorExpr),
    /// `z.object({ ... })`
    Object(Vec<Property>),
    /// `base.extend({ ... })`
    Extend {
        base: String,
        properties: Vec<Property>,
    },
    /// `z.lazy(() => inner)`; the inner expression is evaluated on first use.
    Lazy(Box<Expr>),
    /// `{ KEY: 'value', ... } as const`
    ConstObject(Vec<(String, String)>),
    /// Verbatim source lines, each paired with its nesting level relative
    /// to the statement. Indentation comes from the render options.
    Raw(Vec<(usize, String)>),
}

impl Expr {
    pub fn lazy(inner: Expr) -> Self {
        Self::Lazy(Box::new(inner))
    }
}

/// A property of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceProperty {
    pub name: String,
    pub optional: bool,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
    pub extends: Vec<String>,
    pub properties: Vec<InterfaceProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub exported: bool,
    pub name: String,
    /// Type annotation.
    pub ty: Option<String>,
    pub init: Expr,
    /// JSDoc lines rendered above the statement.
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Each line rendered as `// line`.
    Line,
    /// Lines rendered verbatim (already `/** ... */` framed).
    Block,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Comment {
        style: CommentStyle,
        lines: Vec<String>,
    },
    TypeAlias {
        exported: bool,
        name: String,
        ty: String,
    },
    Const(ConstDecl),
    Interface(InterfaceDecl),
    /// `export * from 'module'`
    ExportAll { module: String },
}

impl Statement {
    pub fn line_comment(line: impl Into<String>) -> Self {
        Self::Comment {
            style: CommentStyle::Line,
            lines: vec![line.into()],
        }
    }

    /// Name of the declared binding, if this statement declares one.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Self::TypeAlias { name, .. } => Some(name),
            Self::Const(decl) => Some(&decl.name),
            Self::Interface(decl) => Some(&decl.name),
            Self::Comment { .. } | Self::ExportAll { .. } => None,
        }
    }
}

/// What an import binds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportBinding {
    /// `import { a, b } from '...'`
    Named(Vec<String>),
    /// `import * as ns from '...'`
    Namespace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub module: String,
    pub binding: ImportBinding,
}

impl ImportDecl {
    pub fn named(module: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            module: module.into(),
            binding: ImportBinding::Named(symbols),
        }
    }

    pub fn namespace(module: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            binding: ImportBinding::Namespace(alias.into()),
        }
    }

    /// Symbols this import brings into scope.
    pub fn symbols(&self) -> Vec<&str> {
        match &self.binding {
            ImportBinding::Named(symbols) => symbols.iter().map(String::as_str).collect(),
            ImportBinding::Namespace(alias) => vec![alias.as_str()],
        }
    }
}

/// The output artifact for one entity, the enum collection, or the barrel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// File name without extension.
    pub file_name: String,
    pub imports: Vec<ImportDecl>,
    pub statements: Vec<Statement>,
}

impl CompilationUnit {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            imports: Vec::new(),
            statements: Vec::new(),
        }
    }

    pub fn find_const(&self, name: &str) -> Option<&ConstDecl> {
        self.statements.iter().find_map(|s| match s {
            Statement::Const(decl) if decl.name == name => Some(decl),
            _ => None,
        })
    }

    pub fn find_interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.statements.iter().find_map(|s| match s {
            Statement::Interface(decl) if decl.name == name => Some(decl),
            _ => None,
        })
    }
}
