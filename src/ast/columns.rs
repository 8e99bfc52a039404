use serde::{Deserialize, Serialize};

use crate::escape::quote_identifier;

/// A column projection entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// A verbatim column or expression token.
    Named(String),
    /// An expression projected under an alias (expr AS `alias`).
    Aliased { expr: String, alias: String },
}

impl Column {
    pub fn named(name: impl Into<String>) -> Self {
        Column::Named(name.into())
    }

    pub fn aliased(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Column::Aliased {
            expr: expr.into(),
            alias: alias.into(),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Named(name) => write!(f, "{}", name),
            Column::Aliased { expr, alias } => {
                write!(f, "{} AS {}", expr, quote_identifier(alias))
            }
        }
    }
}

impl From<&str> for Column {
    fn from(s: &str) -> Self {
        Column::Named(s.to_string())
    }
}

impl From<String> for Column {
    fn from(s: String) -> Self {
        Column::Named(s)
    }
}
