//! Condition compilation and placeholder binding.

use std::collections::HashSet;

use crate::ast::{AttrValue, Bindings, Condition};
use crate::error::{SphinxqlError, SphinxqlResult};
use crate::escape::Escaper;

/// Per-render placeholder state: the bindings source plus the set of names
/// already consumed by a substitution. Built fresh for every render call,
/// so repeated renders of the same query stay pure.
pub(crate) struct Binder<'a> {
    bindings: &'a Bindings,
    consumed: HashSet<String>,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(bindings: &'a Bindings) -> Self {
        Self {
            bindings,
            consumed: HashSet::new(),
        }
    }

    /// Whether `name` was already spent as a placeholder target. An
    /// attribute key that collides with a consumed name must not render
    /// a second, independent condition.
    fn is_consumed(&self, name: &str) -> bool {
        self.consumed.contains(name)
    }

    /// Substitute every `:name` token in `template`, marking the names
    /// consumed. A placeholder with no bindings entry aborts the render.
    fn substitute(&mut self, template: &str, escaper: &dyn Escaper) -> SphinxqlResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(pos) = rest.find(':') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let len = placeholder_len(after);
            if len == 0 {
                // A bare colon, not a placeholder.
                out.push(':');
                rest = after;
                continue;
            }
            let name = &after[..len];
            match self.bindings.get(name) {
                Some(value) => {
                    out.push_str(&escaper.escape(value));
                    self.consumed.insert(name.to_string());
                }
                None => return Err(SphinxqlError::missing_binding(name, template)),
            }
            rest = &after[len..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Length of a placeholder identifier at the start of `s`: an ASCII letter
/// followed by letters, digits or underscores. Zero means no placeholder.
fn placeholder_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphabetic()
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

/// Compile one condition into zero or one boolean fragment. An empty
/// string means the condition carried no content and must be dropped.
pub(crate) fn compile_condition(
    condition: &Condition,
    binder: &mut Binder<'_>,
    escaper: &dyn Escaper,
) -> SphinxqlResult<String> {
    match condition {
        Condition::Template(text) => binder.substitute(text, escaper),
        Condition::Attrs(pairs) => {
            let mut parts = Vec::new();
            for (key, value) in pairs {
                if binder.is_consumed(key) {
                    continue;
                }
                let part = match value {
                    AttrValue::Set(values) => {
                        if values.is_empty() {
                            continue;
                        }
                        let vals: Vec<String> =
                            values.iter().map(|v| escaper.escape(v)).collect();
                        format!("{} IN ({})", key, vals.join(", "))
                    }
                    AttrValue::Range {
                        low,
                        high,
                        inclusive: true,
                    } => format!("{} BETWEEN {} AND {}", key, low, high),
                    AttrValue::Range {
                        low,
                        high,
                        inclusive: false,
                    } => format!("{} >= {} AND {} < {}", key, low, key, high),
                    // Escaping keeps numerals bare and quotes anything else.
                    AttrValue::Number(n) => format!("{} = {}", key, escaper.escape(n)),
                    AttrValue::Template(text) => {
                        format!("{} {}", key, binder.substitute(text, escaper)?)
                    }
                };
                parts.push(part);
            }
            Ok(parts.join(" AND "))
        }
    }
}
