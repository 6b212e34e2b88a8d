//! Explicit representation of absent cell values.
//!
//! Spreadsheets encode "no value" in many ways (empty cells, `nan`, `None`,
//! `#N/A`). Everything is folded into [`CellValue::Absent`] at the
//! normalization boundary so downstream code never re-derives absence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal cell texts treated as "no value".
pub const ABSENT_MARKERS: [&str; 8] = ["nan", "NaN", "None", "none", "null", "NULL", "<NA>", "#N/A"];

/// Returns true when the trimmed text is empty or an absent marker.
pub fn is_absent_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || ABSENT_MARKERS.contains(&trimmed)
}

/// A single cell that is either present or explicitly absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum CellValue {
    Present(String),
    #[default]
    Absent,
}

impl CellValue {
    /// Wraps raw cell text unchanged, folding absent markers into `Absent`.
    pub fn from_raw(raw: &str) -> Self {
        if is_absent_marker(raw) {
            Self::Absent
        } else {
            Self::Present(raw.to_string())
        }
    }

    /// Like [`CellValue::from_raw`] but stores the trimmed text.
    pub fn trimmed(raw: &str) -> Self {
        if is_absent_marker(raw) {
            Self::Absent
        } else {
            Self::Present(raw.trim().to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present(value) => Some(value.as_str()),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Returns the present text or `fallback`.
    pub fn or_display<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.as_str().unwrap_or(fallback)
    }

    /// Text written to an exported cell (absent becomes empty).
    pub fn cell_text(&self) -> &str {
        self.or_display("")
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => Self::from_raw(&text),
            None => Self::Absent,
        }
    }
}

impl From<CellValue> for Option<String> {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Present(text) => Some(text),
            CellValue::Absent => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cell_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_markers_fold_to_absent() {
        for marker in ["", "   ", "nan", "None", "#N/A", " NULL "] {
            assert_eq!(CellValue::from_raw(marker), CellValue::Absent, "{marker:?}");
        }
    }

    #[test]
    fn from_raw_keeps_text_unchanged() {
        assert_eq!(
            CellValue::from_raw("  MG "),
            CellValue::Present("  MG ".to_string())
        );
        assert_eq!(CellValue::trimmed("  MG "), CellValue::Present("MG".to_string()));
    }

    #[test]
    fn display_fallback() {
        assert_eq!(CellValue::Absent.or_display("Normal Sample"), "Normal Sample");
        assert_eq!(CellValue::Present("STD".into()).or_display("x"), "STD");
        assert_eq!(CellValue::Absent.cell_text(), "");
    }

    #[test]
    fn serializes_as_optional_string() {
        let json = serde_json::to_string(&vec![CellValue::Absent, CellValue::Present("a".into())])
            .expect("serialize");
        assert_eq!(json, r#"[null,"a"]"#);
    }
}
