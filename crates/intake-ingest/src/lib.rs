//! Manifest ingestion.
//!
//! Holds uploaded manifest bytes as a [`ManifestSource`] and decodes them
//! into a [`RawTable`] through the [`TabularDecoder`] capability. The
//! shipped decoder reads delimited text with Polars.
//!
//! # Example
//!
//! ```ignore
//! use intake_ingest::{ManifestSource, PolarsCsvDecoder, TabularDecoder};
//!
//! let source = ManifestSource::new("lote_42.csv", None, bytes)?;
//! let columns = PolarsCsvDecoder::new().columns(&source, 18)?;
//! ```

mod cells;
mod csv;
mod decoder;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sources ===
pub use source::{ManifestFormat, ManifestSource};

// === Decoding ===
pub use csv::{PolarsCsvDecoder, check_encoding};
pub use decoder::{RawTable, TabularDecoder};

// === Cell Conversion ===
pub use cells::{any_to_string, format_numeric};
