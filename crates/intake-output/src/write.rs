//! Writing encoded tables to disk.

use std::fs;
use std::path::{Path, PathBuf};

use intake_model::SampleTable;
use tracing::info;

use crate::encoder::TableEncoder;
use crate::error::{OutputError, Result};
use crate::filename::export_filename;

/// Ensure a parent directory exists for a file path.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Encodes `table` into `output_dir` under its export name and returns the
/// written path.
pub fn write_export(
    output_dir: &Path,
    source_filename: &str,
    table: &SampleTable,
    encoder: &dyn TableEncoder,
) -> Result<PathBuf> {
    let path = output_dir.join(export_filename(source_filename, encoder.extension()));
    write_table(&path, table, encoder)?;
    Ok(path)
}

/// Encodes `table` to exactly `path`, creating parent directories.
pub fn write_table(path: &Path, table: &SampleTable, encoder: &dyn TableEncoder) -> Result<()> {
    let bytes = encoder.encode(table)?;
    ensure_parent_dir(path)?;
    fs::write(path, &bytes).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        records = table.len(),
        bytes = bytes.len(),
        "table exported"
    );
    Ok(())
}
