//! Error types for table export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// The CSV writer rejected a record.
    #[error("failed to encode table: {source}")]
    Encode {
        #[source]
        source: csv::Error,
    },

    /// Writing the export file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
