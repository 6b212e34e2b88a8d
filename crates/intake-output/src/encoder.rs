//! Table encoders.
//!
//! The registry never owns an on-disk format. An encoder turns a
//! [`SampleTable`] into bytes in its column order; the scanned flag is
//! written as `TRUE`/`FALSE` and absent cells as empty fields so the file
//! re-imports cleanly.

use std::borrow::Cow;

use intake_model::{SampleRecord, SampleTable};

use crate::error::{OutputError, Result};

/// Serializes a sample table for download.
pub trait TableEncoder: Send + Sync {
    /// File extension of the encoded output, without the dot.
    fn extension(&self) -> &str;

    fn encode(&self, table: &SampleTable) -> Result<Vec<u8>>;
}

/// Delimited text encoder.
#[derive(Debug, Clone, Copy)]
pub struct CsvTableEncoder {
    delimiter: u8,
}

impl CsvTableEncoder {
    /// Comma-separated output.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Tab-separated output.
    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for CsvTableEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableEncoder for CsvTableEncoder {
    fn extension(&self) -> &str {
        if self.delimiter == b'\t' { "tsv" } else { "csv" }
    }

    fn encode(&self, table: &SampleTable) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());
        let encode_error = |source| OutputError::Encode { source };

        writer
            .write_record(table.columns())
            .map_err(encode_error)?;
        for record in table.records() {
            writer
                .write_record(row_cells(record, table.columns()))
                .map_err(encode_error)?;
        }
        writer
            .into_inner()
            .map_err(|err| OutputError::Encode {
                source: csv::Error::from(err.into_error()),
            })
    }
}

fn row_cells(record: &SampleRecord, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| record.cell(column).map(Cow::into_owned).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use intake_model::columns;
    use intake_model::{CellValue, ScanStamp};

    use super::*;

    fn table() -> SampleTable {
        let mut scanned = SampleRecord::new("85990", "SH-1");
        scanned.mark_scanned(ScanStamp {
            date: "2024-05-01".to_string(),
            time: "10:30:00".to_string(),
            operator: CellValue::Present("alice".to_string()),
        });
        scanned
            .extra
            .insert("Desde".to_string(), CellValue::Present("10".to_string()));
        let mut pending = SampleRecord::new("85991", "SH-1");
        pending.qaqc_type = CellValue::Present("DUP".to_string());

        let mut names = vec!["Desde".to_string(), columns::SAMPLE_ID.to_string()];
        names.extend(columns::CONTROL_COLUMNS.iter().map(|c| (*c).to_string()));
        SampleTable::new(names, vec![scanned, pending])
    }

    #[test]
    fn csv_output() {
        let bytes = CsvTableEncoder::new().encode(&table()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        insta::assert_snapshot!(text.trim_end(), @r"
        Desde,Sample ID,QAQC Type,CRM Type,Shipment Number,Scanned,Scan Date,Scan Time,Scanned By
        10,85990,,,SH-1,TRUE,2024-05-01,10:30:00,alice
        ,85991,DUP,,SH-1,FALSE,,,
        ");
    }

    #[test]
    fn tsv_extension_and_delimiter() {
        let encoder = CsvTableEncoder::tsv();
        assert_eq!(encoder.extension(), "tsv");
        let text = String::from_utf8(encoder.encode(&table()).unwrap()).unwrap();
        assert!(text.starts_with("Desde\tSample ID\t"));
    }

    #[test]
    fn empty_table_writes_header_only() {
        let table = SampleTable::new(vec![columns::SAMPLE_ID.to_string()], Vec::new());
        let bytes = CsvTableEncoder::new().encode(&table).unwrap();
        assert_eq!(bytes, b"Sample ID\n");
    }
}
