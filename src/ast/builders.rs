//! Condition builders for WHERE clauses.

use crate::ast::{AttrValue, Condition, Value};

/// A bare templated condition, e.g. `template("attr != :v")`.
pub fn template(text: impl Into<String>) -> Condition {
    Condition::Template(text.into())
}

/// A single attribute filter with the shape inferred from the value.
pub fn attr(key: &str, value: impl Into<AttrValue>) -> Condition {
    Condition::Attrs(vec![(key.to_string(), value.into())])
}

/// Membership filter (`key IN (values)`).
pub fn is_in<V: Into<Value>>(key: &str, values: impl IntoIterator<Item = V>) -> Condition {
    Condition::Attrs(vec![(
        key.to_string(),
        AttrValue::Set(values.into_iter().map(Into::into).collect()),
    )])
}

/// Closed range filter (`key BETWEEN low AND high`).
pub fn between(key: &str, low: impl Into<Value>, high: impl Into<Value>) -> Condition {
    Condition::Attrs(vec![(
        key.to_string(),
        AttrValue::Range {
            low: low.into(),
            high: high.into(),
            inclusive: true,
        },
    )])
}

/// Half-open range filter (`key >= low AND key < high`).
pub fn range(key: &str, low: impl Into<Value>, high: impl Into<Value>) -> Condition {
    Condition::Attrs(vec![(
        key.to_string(),
        AttrValue::Range {
            low: low.into(),
            high: high.into(),
            inclusive: false,
        },
    )])
}

/// Numeric equality filter (`key = n`).
pub fn eq(key: &str, value: impl Into<Value>) -> Condition {
    Condition::Attrs(vec![(key.to_string(), AttrValue::Number(value.into()))])
}
