//! Crate error type.

use thiserror::Error;

/// Errors surfaced to callers of the engine.
///
/// Highlighting is an assistive feature, so runtime irregularities (a term
/// that matches nothing, an unknown selected container, an edit with no
/// steps) are not errors. The variants here cover precondition violations
/// that should fail fast rather than silently produce wrong ranges.
#[derive(Debug, Error)]
pub enum Error {
    /// A pattern was requested for an empty or blank search term.
    /// Callers are expected to treat a blank term as "search cleared".
    #[error("search term is empty")]
    EmptyTerm,

    /// A region was constructed with `from` past `to`.
    #[error("invalid region: from {from} is greater than to {to}")]
    InvalidRegion { from: usize, to: usize },

    /// The underlying regex engine rejected the built pattern.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}
