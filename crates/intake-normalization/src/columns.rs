//! Column-name normalization.

/// Collapses embedded line breaks to single spaces and trims.
///
/// Spreadsheet headers often wrap ("N°\nMuestra"); operators pick columns by
/// the normalized name.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Normalizes every name and makes repeats unique (`Desde`, `Desde (2)`).
pub fn normalize_columns(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let base = normalize_column_name(name);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while out.contains(&candidate) {
            candidate = format!("{base} ({suffix})");
            suffix += 1;
        }
        out.push(candidate);
    }
    out
}
