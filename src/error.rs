//! Error types for graph construction and search.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ChronographError>;

/// Errors surfaced by graph construction, lookup, and search.
#[derive(Debug, Error)]
pub enum ChronographError {
    /// A caller-supplied value is malformed (inverted range, NaN weight,
    /// invalid configuration). Rejected at the call boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A lookup addressed an element that does not exist: no edge between
    /// the requested vertex pair, an unregistered node label, or a
    /// correspondence query for an element that was never matched.
    #[error("not found: {0}")]
    NotFound(String),

    /// Attribute slot counts or kinds disagree between compared attribute
    /// sets, or between attributes and the graph's declared schema. This
    /// indicates the query and data graphs were built against incompatible
    /// attribute definitions, so it fails fast instead of degrading to a
    /// non-match.
    #[error("attribute schema mismatch: {0}")]
    SchemaMismatch(String),
}
