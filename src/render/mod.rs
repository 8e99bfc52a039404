//! SphinxQL statement rendering.
//!
//! Compiles the accumulated query description into one statement string.
//! The escaper is injected per call; no state outlives a render.

pub mod conditions;
pub mod select;

use crate::ast::SelectQuery;
use crate::error::SphinxqlResult;
use crate::escape::Escaper;

/// Trait for compiling AST nodes into SphinxQL text.
pub trait ToSphinxql {
    /// Compile this node, escaping literals through `escaper`.
    fn to_sphinxql(&self, escaper: &dyn Escaper) -> SphinxqlResult<String>;
}

impl ToSphinxql for SelectQuery {
    fn to_sphinxql(&self, escaper: &dyn Escaper) -> SphinxqlResult<String> {
        select::build_select(self, escaper)
    }
}
