//! # Formatting Backend
//!
//! Turns a [`CompilationUnit`] into TypeScript source. Only punctuation and
//! whitespace are decided here: indent width and character, quote style,
//! statement semicolons, and trailing commas in multi-line literals.
//!
//! ## Layout
//!
//! - Imports come first, one per line, followed by a blank line.
//! - Statements are separated by a blank line, except directly after a
//!   comment, between consecutive non-exported helper declarations, and
//!   between consecutive re-exports.
//! - The output ends with exactly one newline.

use zodgen_core::{Config, IndentType, SemicolonPreference};

use crate::decl::{
    CommentStyle, CompilationUnit, ConstDecl, Expr, ImportBinding, ImportDecl, InterfaceDecl,
    Property, Statement,
};

/// Punctuation and whitespace choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// One level of indentation.
    pub indent: String,
    pub quote: char,
    pub semicolons: bool,
    pub trailing_commas: bool,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        let indent = match config.indent_type {
            IndentType::Tab => "\t".to_string(),
            IndentType::Space => " ".repeat(config.indent_size),
        };
        Self {
            indent,
            quote: if config.single_quote { '\'' } else { '"' },
            semicolons: config.semicolon == SemicolonPreference::Insert,
            trailing_commas: config.trailing_commas,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Render a unit to source text.
pub fn render_unit(unit: &CompilationUnit, options: &RenderOptions) -> String {
    Renderer { options }.unit(unit)
}

struct Renderer<'a> {
    options: &'a RenderOptions,
}

impl Renderer<'_> {
    fn unit(&self, unit: &CompilationUnit) -> String {
        let mut out = String::new();
        for import in &unit.imports {
            out.push_str(&self.import(import));
            out.push('\n');
        }
        if !unit.imports.is_empty() && !unit.statements.is_empty() {
            out.push('\n');
        }

        let mut previous: Option<&Statement> = None;
        for statement in &unit.statements {
            if let Some(prev) = previous {
                if separated(prev, statement) {
                    out.push('\n');
                }
            }
            out.push_str(&self.statement(statement));
            out.push('\n');
            previous = Some(statement);
        }
        out
    }

    fn semi(&self) -> &'static str {
        if self.options.semicolons {
            ";"
        } else {
            ""
        }
    }

    fn quoted(&self, text: &str) -> String {
        let q = self.options.quote;
        let mut out = String::with_capacity(text.len() + 2);
        out.push(q);
        for c in text.chars() {
            if c == q || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push(q);
        out
    }

    fn indent(&self, depth: usize) -> String {
        self.options.indent.repeat(depth)
    }

    fn import(&self, import: &ImportDecl) -> String {
        let binding = match &import.binding {
            ImportBinding::Named(symbols) => format!("{{ {} }}", symbols.join(", ")),
            ImportBinding::Namespace(alias) => format!("* as {alias}"),
        };
        format!(
            "import {binding} from {}{}",
            self.quoted(&import.module),
            self.semi()
        )
    }

    fn statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::Comment { style, lines } => match style {
                CommentStyle::Line => lines
                    .iter()
                    .map(|line| format!("// {line}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
                CommentStyle::Block => lines.join("\n"),
            },
            Statement::TypeAlias { exported, name, ty } => {
                format!("{}type {name} = {ty}{}", export(*exported), self.semi())
            }
            Statement::Const(decl) => self.constant(decl),
            Statement::Interface(decl) => self.interface(decl),
            Statement::ExportAll { module } => {
                format!("export * from {}{}", self.quoted(module), self.semi())
            }
        }
    }

    fn constant(&self, decl: &ConstDecl) -> String {
        let mut out = String::new();
        for line in &decl.docs {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(export(decl.exported));
        out.push_str("const ");
        out.push_str(&decl.name);
        if let Some(ty) = &decl.ty {
            out.push_str(": ");
            out.push_str(ty);
        }
        out.push_str(" = ");
        out.push_str(&self.expr(&decl.init, 0));
        out.push_str(self.semi());
        out
    }

    fn interface(&self, decl: &InterfaceDecl) -> String {
        let mut out = format!("export interface {}", decl.name);
        if !decl.extends.is_empty() {
            out.push_str(" extends ");
            out.push_str(&decl.extends.join(", "));
        }
        if decl.properties.is_empty() {
            out.push_str(" {}");
            return out;
        }
        out.push_str(" {\n");
        let pad = self.indent(1);
        for property in &decl.properties {
            let optional = if property.optional { "?" } else { "" };
            out.push_str(&format!(
                "{pad}{}{optional}: {}{}\n",
                property.name,
                property.ty,
                self.semi()
            ));
        }
        out.push('}');
        out
    }

    fn expr(&self, expr: &Expr, depth: usize) -> String {
        match expr {
            Expr::Validator(validator) => validator.to_string(),
            Expr::Object(properties) => format!("z.object({})", self.properties(properties, depth)),
            Expr::Extend { base, properties } => {
                format!("{base}.extend({})", self.properties(properties, depth))
            }
            Expr::Lazy(inner) => format!("z.lazy(() => {})", self.expr(inner, depth)),
            Expr::ConstObject(entries) => {
                let lines: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", self.quoted(value)))
                    .collect();
                format!("{} as const", self.block(&lines, depth))
            }
            Expr::Raw(lines) => lines
                .iter()
                .enumerate()
                .map(|(i, (level, line))| {
                    if i == 0 || line.is_empty() {
                        line.clone()
                    } else {
                        format!("{}{line}", self.indent(depth + level))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn properties(&self, properties: &[Property], depth: usize) -> String {
        if properties.is_empty() {
            return "{}".to_string();
        }
        let pad = self.indent(depth + 1);
        let entries: Vec<String> = properties
            .iter()
            .map(|property| {
                let mut entry = String::new();
                for line in &property.docs {
                    entry.push_str(line);
                    entry.push('\n');
                    entry.push_str(&pad);
                }
                entry.push_str(&format!("{}: {}", property.name, property.value));
                entry
            })
            .collect();
        self.block(&entries, depth)
    }

    /// `{ a, b }` spread over lines, one entry per line.
    fn block(&self, entries: &[String], depth: usize) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }
        let pad = self.indent(depth + 1);
        let mut out = String::from("{\n");
        for (i, entry) in entries.iter().enumerate() {
            let last = i + 1 == entries.len();
            out.push_str(&pad);
            out.push_str(entry);
            if !last || self.options.trailing_commas {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&self.indent(depth));
        out.push('}');
        out
    }
}

fn export(exported: bool) -> &'static str {
    if exported {
        "export "
    } else {
        ""
    }
}

/// Whether a blank line goes between two adjacent statements.
fn separated(prev: &Statement, next: &Statement) -> bool {
    match (prev, next) {
        (Statement::Comment { .. }, _) => false,
        (Statement::ExportAll { .. }, Statement::ExportAll { .. }) => false,
        _ => !(is_helper(prev) && is_helper(next)),
    }
}

fn is_helper(statement: &Statement) -> bool {
    match statement {
        Statement::TypeAlias { exported, .. } => !exported,
        Statement::Const(decl) => !decl.exported,
        _ => false,
    }
}
