//! Value escaping for the target engine.

use crate::ast::Value;

/// Renders scalar values as engine-safe literals.
///
/// Injected into rendering rather than reached through ambient state, so
/// callers can substitute their own rules. The compiler treats it as a
/// black box; the escaping contract is owned by the implementation.
pub trait Escaper {
    /// Render one scalar as a literal safe to splice into a statement.
    /// Numerals come back bare, strings come back quoted.
    fn escape(&self, value: &Value) -> String;

    /// Escape a full-text query term. The assembler wraps the result in
    /// `MATCH('...')`, so the returned text must not close that literal.
    fn escape_match(&self, term: &str) -> String;
}

/// Characters with operator meaning in the Sphinx extended query syntax.
const MATCH_SPECIALS: &[char] = &[
    '\\', '(', ')', '|', '-', '!', '@', '~', '"', '&', '/', '^', '$', '=', '<', '\'',
];

/// Default escaper for Sphinx/Manticore.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphinxEscaper;

impl Escaper for SphinxEscaper {
    fn escape(&self, value: &Value) -> String {
        match value {
            Value::String(s) => {
                format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
            v => v.to_string(),
        }
    }

    fn escape_match(&self, term: &str) -> String {
        let mut out = String::with_capacity(term.len());
        for c in term.chars() {
            if MATCH_SPECIALS.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

/// Quote an identifier with backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
