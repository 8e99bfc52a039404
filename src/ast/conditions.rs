use serde::{Deserialize, Serialize};

use crate::ast::Value;

/// The right-hand shape of one attribute filter.
///
/// Constructed explicitly or inferred once at the API boundary through the
/// `From` impls below; the compiler matches exhaustively, no shape falls
/// through silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Membership test: `key IN (v1, v2, ...)`, each element escaped.
    Set(Vec<Value>),
    /// Bounded range. Inclusive renders `BETWEEN`, half-open renders
    /// a `>=`/`<` pair.
    Range {
        low: Value,
        high: Value,
        inclusive: bool,
    },
    /// Numeric equality, rendered as a bare numeral.
    Number(Value),
    /// Operator template with `:name` placeholders, e.g. `"> :lngval"`.
    Template(String),
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(Value::Int(n as i64))
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(Value::Int(n))
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(Value::Float(n))
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Template(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Template(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for AttrValue {
    fn from(values: Vec<T>) -> Self {
        AttrValue::Set(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for AttrValue {
    fn from(values: [T; N]) -> Self {
        AttrValue::Set(values.into_iter().map(Into::into).collect())
    }
}

/// Rust `a..b` is half-open, matching the `>=`/`<` rendering.
impl<T: Into<Value>> From<std::ops::Range<T>> for AttrValue {
    fn from(r: std::ops::Range<T>) -> Self {
        AttrValue::Range {
            low: r.start.into(),
            high: r.end.into(),
            inclusive: false,
        }
    }
}

/// Rust `a..=b` is closed, matching the `BETWEEN` rendering.
impl<T: Into<Value>> From<std::ops::RangeInclusive<T>> for AttrValue {
    fn from(r: std::ops::RangeInclusive<T>) -> Self {
        let (low, high) = r.into_inner();
        AttrValue::Range {
            low: low.into(),
            high: high.into(),
            inclusive: true,
        }
    }
}

/// One filter entry contributing to the WHERE clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// A bare boolean expression with optional `:name` placeholders.
    Template(String),
    /// Attribute filters; non-empty fragments are joined with AND.
    Attrs(Vec<(String, AttrValue)>),
}

impl From<&str> for Condition {
    fn from(s: &str) -> Self {
        Condition::Template(s.to_string())
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        Condition::Template(s)
    }
}

/// Named values that fill `:name` placeholders during rendering.
///
/// A separate input on the query, never rendered as a condition of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bindings(Vec<(String, Value)>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, replacing the value if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}
