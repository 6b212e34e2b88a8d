//! Sample identifier filtering.
//!
//! Manifests carry stray text rows (notes, totals, signatures) below or
//! between samples. Only values passing the configured rule become records.

use intake_model::{IdentifierRule, is_absent_marker};

/// Returns the canonical identifier, or `None` when the row is not a sample.
pub fn normalize_identifier(raw: &str, rule: IdentifierRule) -> Option<String> {
    let trimmed = raw.trim();
    if is_absent_marker(trimmed) {
        return None;
    }
    match rule {
        IdentifierRule::ContainsDigit => trimmed
            .chars()
            .any(|ch| ch.is_ascii_digit())
            .then(|| trimmed.to_string()),
        IdentifierRule::NumericOnly => normalize_numeric(trimmed),
    }
}

fn normalize_numeric(value: &str) -> Option<String> {
    let parsed = value.parse::<f64>().ok()?;
    if !parsed.is_finite() || !value.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }
    // 85990.0 is a float artifact of a numeric cell, not a different sample.
    if let Some((integer, fraction)) = value.split_once('.')
        && !integer.is_empty()
        && !fraction.is_empty()
        && fraction.chars().all(|ch| ch == '0')
    {
        return Some(integer.to_string());
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_digit_rule() {
        let rule = IdentifierRule::ContainsDigit;
        assert_eq!(normalize_identifier(" 85990 ", rule), Some("85990".into()));
        assert_eq!(normalize_identifier("AB-12", rule), Some("AB-12".into()));
        assert_eq!(normalize_identifier("Total", rule), None);
        assert_eq!(normalize_identifier("nan", rule), None);
        assert_eq!(normalize_identifier("", rule), None);
    }

    #[test]
    fn numeric_only_rule() {
        let rule = IdentifierRule::NumericOnly;
        assert_eq!(normalize_identifier("85990.0", rule), Some("85990".into()));
        assert_eq!(normalize_identifier("85990.000", rule), Some("85990".into()));
        assert_eq!(normalize_identifier("85990", rule), Some("85990".into()));
        assert_eq!(normalize_identifier("12.5", rule), Some("12.5".into()));
        assert_eq!(normalize_identifier("AB-12", rule), None);
        assert_eq!(normalize_identifier("inf", rule), None);
        assert_eq!(normalize_identifier("None", rule), None);
    }
}
