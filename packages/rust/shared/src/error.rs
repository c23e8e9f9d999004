//! Error types for unitdex.
//!
//! Library crates use [`HarvestError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! A failed fetch is the only fatal condition in the system: it aborts the
//! whole harvest with no partial output. Everything else the corpus can
//! throw at us (missing titles, short rows, non-qualifying tables) is
//! expected data variance and is absorbed by fallbacks, not errors.

use crate::types::DocumentId;

/// Top-level error type for all unitdex operations.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// The corpus does not have the requested document (non-success response).
    #[error("document not found: {id}")]
    NotFound { id: DocumentId },

    /// Transport-level failure while fetching a document.
    #[error("network error: {0}")]
    Network(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HarvestError>;

impl HarvestError {
    /// Create a not-found error for the given document.
    pub fn not_found(id: impl Into<DocumentId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a network error from any displayable message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = HarvestError::not_found("03_osc_units.md");
        assert_eq!(err.to_string(), "document not found: 03_osc_units.md");

        let err = HarvestError::network("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
