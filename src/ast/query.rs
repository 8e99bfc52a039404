use serde::{Deserialize, Serialize};

use crate::ast::{Bindings, Column, Condition, Value};
use crate::error::SphinxqlResult;
use crate::escape::Escaper;
use crate::render::ToSphinxql;

/// LIMIT directive: a plain count, or a combined offset+count pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Limit {
    /// `LIMIT count`
    Count(u64),
    /// `LIMIT offset,count`
    Paged { offset: u64, count: u64 },
}

impl From<u64> for Limit {
    fn from(count: u64) -> Self {
        Limit::Count(count)
    }
}

impl From<(u64, u64)> for Limit {
    fn from((offset, count): (u64, u64)) -> Self {
        Limit::Paged { offset, count }
    }
}

impl From<[u64; 2]> for Limit {
    fn from([offset, count]: [u64; 2]) -> Self {
        Limit::Paged { offset, count }
    }
}

/// Accumulates SELECT intent and compiles it into one SphinxQL statement.
///
/// Every mutator consumes and returns the query, so calls chain. Rendering
/// borrows the query immutably; it can be repeated and never changes state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    /// Column projections; renders `*` when empty.
    pub columns: Vec<Column>,
    /// Source index names.
    pub indices: Vec<String>,
    /// Full-text match terms, one MATCH() predicate each.
    pub match_terms: Vec<String>,
    /// Filter conditions in append order.
    pub conditions: Vec<Condition>,
    /// Values for `:name` placeholders in templated conditions.
    pub bindings: Bindings,
    pub group_by: Option<String>,
    pub order_by: Option<String>,
    /// WITHIN GROUP ORDER BY expression.
    pub group_order_by: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<Limit>,
    /// Engine options in insertion order.
    pub options: Vec<(String, Value)>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one column projection.
    pub fn column(mut self, col: impl Into<Column>) -> Self {
        self.columns.push(col.into());
        self
    }

    /// Append column projections.
    pub fn columns<C: Into<Column>>(mut self, cols: impl IntoIterator<Item = C>) -> Self {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Append source indices.
    pub fn from<S: Into<String>>(mut self, indices: impl IntoIterator<Item = S>) -> Self {
        self.indices.extend(indices.into_iter().map(Into::into));
        self
    }

    /// Append one full-text match term.
    pub fn matching(mut self, term: impl Into<String>) -> Self {
        self.match_terms.push(term.into());
        self
    }

    /// Append one filter condition.
    pub fn filter(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Append filter conditions.
    pub fn where_all<C: Into<Condition>>(mut self, conditions: impl IntoIterator<Item = C>) -> Self {
        self.conditions.extend(conditions.into_iter().map(Into::into));
        self
    }

    /// Bind one placeholder value.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bindings.insert(name, value);
        self
    }

    /// Bind several placeholder values.
    pub fn bindings<K: Into<String>, V: Into<Value>>(
        mut self,
        bindings: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        for (name, value) in bindings {
            self.bindings.insert(name, value);
        }
        self
    }

    pub fn group_by(mut self, attribute: impl Into<String>) -> Self {
        self.group_by = Some(attribute.into());
        self
    }

    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    pub fn group_order_by(mut self, order: impl Into<String>) -> Self {
        self.group_order_by = Some(order.into());
        self
    }

    /// Set the limit: a count, or an `(offset, count)` pair. The pair form
    /// conflicts with [`offset`](Self::offset); rendering rejects both set.
    pub fn limit(mut self, limit: impl Into<Limit>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set one engine option, replacing the value if the name exists.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.options.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.options.push((name, value));
        }
        self
    }

    /// Merge engine options, keeping insertion order for new names.
    pub fn with_options<K: Into<String>, V: Into<Value>>(
        mut self,
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        for (name, value) in options {
            self = self.with_option(name, value);
        }
        self
    }

    /// Compile the accumulated intent into one statement string.
    pub fn render(&self, escaper: &dyn Escaper) -> SphinxqlResult<String> {
        self.to_sphinxql(escaper)
    }
}
