//! The tabular decoding capability consumed by the normalizer.

use crate::error::Result;
use crate::source::ManifestSource;

/// Rows of raw cell text under a header row.
///
/// Column names are exactly as found in the file; normalization happens
/// downstream. Every row has one cell per column, empty for missing cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell text at `row`/`column`, empty when out of range.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Turns manifest bytes plus a 1-based header row into rows.
pub trait TabularDecoder: Send + Sync {
    /// Decodes every data row below `header_row`.
    fn decode(&self, source: &ManifestSource, header_row: usize) -> Result<RawTable>;

    /// Reads only the column names at `header_row`.
    fn columns(&self, source: &ManifestSource, header_row: usize) -> Result<Vec<String>> {
        Ok(self.decode(source, header_row)?.columns)
    }
}
