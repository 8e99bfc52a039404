//! Error types for SphinxQL compilation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SphinxqlError {
    /// A template placeholder with no matching entry in the bindings.
    #[error("missing value for :{placeholder} in \"{template}\"")]
    MissingBinding { placeholder: String, template: String },

    /// Both the standalone offset and the pair form of limit set an offset.
    #[error(
        "conflicting paging: OFFSET {offset} and LIMIT {limit_offset},{limit_count} both set an offset"
    )]
    ConflictingPaging {
        offset: u64,
        limit_offset: u64,
        limit_count: u64,
    },
}

impl SphinxqlError {
    /// Create a missing-binding error for the given placeholder and template.
    pub fn missing_binding(placeholder: impl Into<String>, template: impl Into<String>) -> Self {
        Self::MissingBinding {
            placeholder: placeholder.into(),
            template: template.into(),
        }
    }
}

/// Result type alias for SphinxQL compilation.
pub type SphinxqlResult<T> = Result<T, SphinxqlError>;
