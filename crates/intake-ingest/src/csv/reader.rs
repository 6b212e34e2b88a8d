//! CSV/TSV manifest decoding with an explicit header row.

use std::io::Cursor;

use polars::prelude::*;

use crate::cells::any_to_string;
use crate::decoder::{RawTable, TabularDecoder};
use crate::error::{IngestError, Result};
use crate::source::{ManifestFormat, ManifestSource};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reject encodings the decoder cannot read.
///
/// UTF-8 with or without BOM is accepted; UTF-16 BOMs are refused.
pub fn check_encoding(bytes: &[u8], header_row: usize) -> Result<()> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::Parse {
            row: header_row,
            message: "UTF-16 encoded manifests are not supported".to_string(),
        });
    }
    Ok(())
}

/// Decodes delimited manifests with Polars.
///
/// Every column is read as text so identifiers keep their leading zeros and
/// exact spelling. Ragged rows are truncated to the header width.
#[derive(Debug, Clone, Default)]
pub struct PolarsCsvDecoder {
    /// Limit on data rows read, used for header previews.
    max_rows: Option<usize>,
}

impl PolarsCsvDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `rows` data rows.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    fn read_frame(
        &self,
        source: &ManifestSource,
        header_row: usize,
        n_rows: Option<usize>,
    ) -> Result<DataFrame> {
        if header_row == 0 {
            return Err(IngestError::InvalidHeaderRow { row: header_row });
        }
        let separator = match source.format() {
            ManifestFormat::Workbook => {
                return Err(IngestError::UnsupportedFormat {
                    extension: extension_of(source.filename()),
                });
            }
            format => format.separator().unwrap_or(b','),
        };
        let bytes = source.bytes();
        check_encoding(bytes, header_row)?;
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        // Polars drops empty lines at the top before applying `skip_rows`.
        let (leading_blank, bytes) = split_leading_blank_lines(bytes);
        if header_row <= leading_blank {
            return Err(IngestError::NoColumns { row: header_row });
        }

        let parse_error = |err: PolarsError| IngestError::Parse {
            row: header_row,
            message: err.to_string(),
        };
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_skip_rows(header_row - 1 - leading_blank)
            .with_infer_schema_length(Some(0))
            .with_n_rows(n_rows)
            .map_parse_options(|opts| {
                opts.with_separator(separator)
                    .with_truncate_ragged_lines(true)
            })
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .map_err(parse_error)?;

        if df.width() == 0 {
            return Err(IngestError::NoColumns { row: header_row });
        }
        Ok(df)
    }
}

impl TabularDecoder for PolarsCsvDecoder {
    fn decode(&self, source: &ManifestSource, header_row: usize) -> Result<RawTable> {
        let df = self.read_frame(source, header_row, self.max_rows)?;
        let table = frame_to_raw(&df);
        tracing::debug!(
            filename = %source.filename(),
            header_row,
            columns = table.columns.len(),
            rows = table.len(),
            "decoded manifest"
        );
        Ok(table)
    }

    fn columns(&self, source: &ManifestSource, header_row: usize) -> Result<Vec<String>> {
        let df = self.read_frame(source, header_row, Some(1))?;
        Ok(column_names(&df))
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn frame_to_raw(df: &DataFrame) -> RawTable {
    let columns = column_names(df);
    let mut rows = vec![Vec::with_capacity(columns.len()); df.height()];
    for column in df.get_columns() {
        for (idx, row) in rows.iter_mut().enumerate() {
            row.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
        }
    }
    RawTable::new(columns, rows)
}

/// Counts the empty lines at the top of `bytes` and returns the remainder.
fn split_leading_blank_lines(bytes: &[u8]) -> (usize, &[u8]) {
    let mut rest = bytes;
    let mut count = 0;
    while let Some(end) = rest.iter().position(|b| *b == b'\n') {
        if !rest[..end].iter().all(|b| *b == b'\r') {
            break;
        }
        count += 1;
        rest = &rest[end + 1..];
    }
    (count, rest)
}

fn extension_of(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
