//! Error types for manifest normalization.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The declared sample column is not among the normalized headers.
    #[error("sample column '{column}' not found (available: {})", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Repeated identifiers under `DuplicatePolicy::Reject`.
    #[error("duplicate sample identifiers: {}", ids.join(", "))]
    DuplicateIdentifiers { ids: Vec<String> },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
