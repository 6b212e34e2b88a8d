//! Export of scanned sample tables.
//!
//! The registry hands out a [`SampleTable`](intake_model::SampleTable); this
//! crate encodes it and names the file `scanned_<original>`.

mod encoder;
mod error;
mod filename;
mod write;

pub use encoder::{CsvTableEncoder, TableEncoder};
pub use error::{OutputError, Result};
pub use filename::{EXPORT_PREFIX, export_filename};
pub use write::{write_export, write_table};
