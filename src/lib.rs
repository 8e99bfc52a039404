//! Builder and compiler for SphinxQL SELECT statements.
//!
//! A [`SelectQuery`] accumulates columns, indices, full-text match terms,
//! filter conditions, grouping, ordering, paging and engine options through
//! fluent mutators, then compiles into a single statement string via
//! [`ToSphinxql`]. No I/O happens here; sending the statement to the engine
//! is the transport client's job.

pub mod ast;
pub mod error;
pub mod escape;
pub mod render;

pub use ast::SelectQuery;
pub use error::{SphinxqlError, SphinxqlResult};
pub use escape::{Escaper, SphinxEscaper};
pub use render::ToSphinxql;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::escape::{Escaper, SphinxEscaper};
    pub use crate::render::ToSphinxql;
}
