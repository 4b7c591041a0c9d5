//! # Documentation Directives
//!
//! Field documentation may carry `@zod` lines that adjust the emitted
//! validator:
//!
//! ```text
//! /// The user's contact address
//! /// @zod.custom(z.string().email())
//! /// @zod.max(255).trim()
//! ```
//!
//! A directive line is a chain of `.name(args)` segments. `custom(expr)`
//! replaces the inferred validator wholesale; every other segment is a
//! chain fragment appended verbatim, in the order written. Arguments may
//! nest brackets and contain string literals. A segment that does not
//! close ends parsing of its line; the remainder is dropped.
//!
//! Lines that are not directives form the field's comment.

/// One directive segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Replace the inferred validator with this expression.
    FullOverride(String),
    /// Append this chain fragment (without the leading dot).
    ModifierAppend(String),
}

/// Documentation split into comment text and directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDocs {
    pub comment: Vec<String>,
    pub directives: Vec<Directive>,
}

impl FieldDocs {
    pub fn parse(documentation: Option<&str>) -> Self {
        let mut docs = Self::default();
        let Some(documentation) = documentation else {
            return docs;
        };

        for line in documentation.lines() {
            let trimmed = line.trim_start();
            match directive_chain(trimmed) {
                Some(chain) => docs.directives.extend(parse_chain(chain)),
                None => docs.comment.push(line.trim_end().to_string()),
            }
        }
        docs
    }

    /// JSDoc lines for the comment, or nothing when there is no comment.
    pub fn jsdoc(&self) -> Vec<String> {
        if self.comment.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.comment.len() + 2);
        lines.push("/**".to_string());
        for line in &self.comment {
            if line.is_empty() {
                lines.push(" *".to_string());
            } else {
                lines.push(format!(" * {line}"));
            }
        }
        lines.push(" */".to_string());
        lines
    }
}

/// The text after a leading `@zod` tag. The tag must end at `.`,
/// whitespace or end of line, so `@zodiac` stays a comment.
fn directive_chain(line: &str) -> Option<&str> {
    let chain = line.strip_prefix("@zod")?;
    match chain.chars().next() {
        None => Some(chain),
        Some(c) if c == '.' || c.is_whitespace() => Some(chain),
        Some(_) => None,
    }
}

fn parse_chain(chain: &str) -> Vec<Directive> {
    let mut directives = Vec::new();
    let mut rest = chain.trim();

    while let Some(after_dot) = rest.strip_prefix('.') {
        let Some(open) = after_dot.find('(') else {
            break;
        };
        let name = &after_dot[..open];
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            break;
        }
        let Some(close) = matching_paren(&after_dot[open..]) else {
            break;
        };
        let args = &after_dot[open + 1..open + close];
        directives.push(if name == "custom" {
            Directive::FullOverride(args.trim().to_string())
        } else {
            Directive::ModifierAppend(format!("{name}({args})"))
        });
        rest = after_dot[open + close + 1..].trim_start();
    }
    directives
}

/// Byte offset of the `)` closing the `(` at the start of `s`.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (c == ')').then_some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
