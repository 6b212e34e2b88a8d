//! Export file naming.

use std::path::Path;

/// Prefix marking a manifest as exported after scanning.
pub const EXPORT_PREFIX: &str = "scanned_";

/// Extensions of manifests this station reads or names.
const MANIFEST_EXTENSIONS: &[&str] = &["csv", "tsv", "tab", "txt", "xls", "xlsx", "xlsm"];

/// `scanned_<original>`, named after the encoder so the extension always
/// matches the bytes.
///
/// A manifest extension that differs from `extension` is replaced; any other
/// suffix is kept and `extension` appended.
pub fn export_filename(original: &str, extension: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(original);
    let path = Path::new(name);
    let current = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let name = match (current.as_deref(), path.file_stem().and_then(|s| s.to_str())) {
        (Some(ext), _) if ext.eq_ignore_ascii_case(extension) => name.to_string(),
        (Some(ext), Some(stem)) if MANIFEST_EXTENSIONS.contains(&ext) => {
            format!("{stem}.{extension}")
        }
        _ => format!("{name}.{extension}"),
    };
    format!("{EXPORT_PREFIX}{name}")
}
