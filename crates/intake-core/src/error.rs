//! Failures reported by the scanning station.
//!
//! Scan outcomes (`NotFound`, duplicates) are not errors; they come back as
//! [`ScanOutcome`](intake_model::ScanOutcome) variants. Only skip-ahead
//! reports an unknown target as an error since it changes nothing.

use intake_ingest::IngestError;
use intake_model::ConfigError;
use intake_normalization::NormalizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    /// No manifest bytes have been loaded.
    #[error("no manifest loaded")]
    NoManifest,

    /// The manifest bytes could not be decoded.
    #[error("failed to decode manifest: {0}")]
    Decode(#[from] IngestError),

    /// The declared sample column does not exist.
    #[error("column '{column}' not found (available: {})", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// A skip-ahead target is not in the table.
    #[error("sample '{sample_id}' not found in manifest")]
    NotFound { sample_id: String },

    /// The operation needs a successful `configure` first.
    #[error("{operation} requires a configured manifest")]
    StateUnconfigured { operation: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Repeated identifiers with `DuplicatePolicy::Reject`.
    #[error("duplicate sample identifiers: {}", ids.join(", "))]
    DuplicateIdentifiers { ids: Vec<String> },

    /// A different manifest was loaded while this configuration was built.
    #[error("manifest was replaced while configuring; configure again")]
    ManifestChanged,
}

impl StationError {
    /// Spreadsheet row a decode failure refers to.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Decode(err) => err.row(),
            _ => None,
        }
    }
}

impl From<NormalizeError> for StationError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::ColumnNotFound { column, available } => {
                Self::ColumnNotFound { column, available }
            }
            NormalizeError::DuplicateIdentifiers { ids } => Self::DuplicateIdentifiers { ids },
        }
    }
}

pub type Result<T> = std::result::Result<T, StationError>;
