//! Error types for manifest decoding.

use thiserror::Error;

/// Errors raised while turning manifest bytes into rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file extension has no decoder.
    #[error("unsupported manifest format '{extension}' (expected .csv, .tsv or .txt)")]
    UnsupportedFormat { extension: String },

    /// The upload carried no bytes.
    #[error("manifest '{filename}' is empty")]
    EmptyManifest { filename: String },

    /// The requested header row is not a valid row number.
    #[error("header row must be 1 or greater (got {row})")]
    InvalidHeaderRow { row: usize },

    /// Nothing could be read at or below the header row.
    #[error("no columns found at header row {row}")]
    NoColumns { row: usize },

    /// The parser rejected the bytes.
    #[error("failed to read manifest at header row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Spreadsheet row the failure refers to, when known.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::InvalidHeaderRow { row } | Self::NoColumns { row } | Self::Parse { row, .. } => {
                Some(*row)
            }
            _ => None,
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
