//! Uploaded manifest bytes held for the lifetime of a session.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use sha2::Digest;

use crate::error::{IngestError, Result};

/// Layout of the uploaded file, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    Csv,
    Tsv,
    /// Spreadsheet binaries (`.xls`, `.xlsx`); needs a dedicated decoder.
    Workbook,
}

impl ManifestFormat {
    /// Detects the format from a declared extension (with or without the dot).
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" | "txt" => Ok(Self::Tsv),
            "xls" | "xlsx" | "xlsm" => Ok(Self::Workbook),
            _ => Err(IngestError::UnsupportedFormat { extension: ext }),
        }
    }

    /// Field separator for delimited formats.
    pub fn separator(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Workbook => None,
        }
    }
}

/// An uploaded manifest: filename, detected format and raw bytes.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone)]
pub struct ManifestSource {
    filename: String,
    format: ManifestFormat,
    bytes: Arc<[u8]>,
    fingerprint: String,
}

impl ManifestSource {
    /// Wraps uploaded bytes. The extension is taken from `filename` unless
    /// `declared_extension` is given.
    pub fn new(
        filename: impl Into<String>,
        declared_extension: Option<&str>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self> {
        let filename = filename.into();
        let bytes: Arc<[u8]> = bytes.into();
        let extension = match declared_extension {
            Some(ext) => ext.to_string(),
            None => Path::new(&filename)
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string(),
        };
        let format = ManifestFormat::from_extension(&extension)?;
        if bytes.is_empty() {
            return Err(IngestError::EmptyManifest { filename });
        }
        let fingerprint = sha256_hex(&bytes);
        tracing::debug!(
            filename = %filename,
            ?format,
            size = bytes.len(),
            fingerprint = %fingerprint,
            "manifest loaded"
        );
        Ok(Self {
            filename,
            format,
            bytes,
            fingerprint,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn format(&self) -> ManifestFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256 of the bytes; the opaque handle given to callers.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Debug for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestSource")
            .field("filename", &self.filename)
            .field("format", &self.format)
            .field("size", &self.bytes.len())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_filename() {
        let source = ManifestSource::new("lote.csv", None, b"a\n1\n".to_vec()).unwrap();
        assert_eq!(source.format(), ManifestFormat::Csv);
        let source = ManifestSource::new("lote.TSV", None, b"a\n1\n".to_vec()).unwrap();
        assert_eq!(source.format(), ManifestFormat::Tsv);
    }

    #[test]
    fn declared_extension_wins() {
        let source = ManifestSource::new("upload", Some(".csv"), b"a\n".to_vec()).unwrap();
        assert_eq!(source.format(), ManifestFormat::Csv);
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(matches!(
            ManifestSource::new("notes.pdf", None, b"x".to_vec()),
            Err(IngestError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            ManifestSource::new("empty.csv", None, Vec::new()),
            Err(IngestError::EmptyManifest { .. })
        ));
    }

    #[test]
    fn fingerprint_is_content_hash() {
        let a = ManifestSource::new("a.csv", None, b"x,y\n".to_vec()).unwrap();
        let b = ManifestSource::new("b.csv", None, b"x,y\n".to_vec()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
