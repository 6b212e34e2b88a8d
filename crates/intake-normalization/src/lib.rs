//! Manifest normalization.
//!
//! Turns decoded rows plus an operator's column mapping into the canonical
//! [`SampleTable`](intake_model::SampleTable):
//!
//! 1. drop the gap rows between header and first sample
//! 2. normalize column names and rename the mapped columns
//! 3. filter rows whose identifier is absent or not a sample
//! 4. carry re-imported scan state and stamp the shipment number

mod columns;
mod error;
mod flags;
mod identifier;
mod normalizer;
mod suggest;

pub use columns::{normalize_column_name, normalize_columns};
pub use error::{NormalizeError, Result};
pub use flags::parse_flag;
pub use identifier::normalize_identifier;
pub use normalizer::{NormalizedManifest, normalize_manifest};
pub use suggest::{ColumnSuggestions, MIN_SUGGESTION_SCORE, suggest_columns};
