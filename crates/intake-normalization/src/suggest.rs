//! Column pre-selection for the operator's mapping step.
//!
//! Each role has a keyword list. A column containing a keyword scores 1.0;
//! otherwise the best Jaro-Winkler similarity against the keywords counts.
//! Roles are then filled greedily, one column per role.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;

/// Minimum score for a column to be suggested.
pub const MIN_SUGGESTION_SCORE: f64 = 0.85;

const SAMPLE_KEYWORDS: [&str; 6] = ["muestra", "muestras", "sample", "id", "código", "codigo"];
const QAQC_KEYWORDS: [&str; 4] = ["qaqc", "control", "std", "tipo"];
const CRM_KEYWORDS: [&str; 3] = ["crm", "estandar", "standard"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Sample,
    Qaqc,
    Crm,
}

impl Role {
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Sample => &SAMPLE_KEYWORDS,
            Self::Qaqc => &QAQC_KEYWORDS,
            Self::Crm => &CRM_KEYWORDS,
        }
    }
}

/// Suggested column per role; `None` when nothing scored high enough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSuggestions {
    pub sample: Option<String>,
    pub qaqc: Option<String>,
    pub crm: Option<String>,
}

/// Suggests sample/QAQC/CRM columns from normalized column names.
pub fn suggest_columns(columns: &[String]) -> ColumnSuggestions {
    // (column index, role, score)
    let mut candidates: Vec<(usize, Role, f64)> = Vec::new();
    for (idx, column) in columns.iter().enumerate() {
        let normalized = normalize(column);
        if normalized.is_empty() {
            continue;
        }
        for role in [Role::Sample, Role::Qaqc, Role::Crm] {
            let score = score(&normalized, role.keywords());
            if score >= MIN_SUGGESTION_SCORE {
                candidates.push((idx, role, score));
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let mut suggestions = ColumnSuggestions::default();
    let mut used: Vec<usize> = Vec::new();
    for (idx, role, _) in candidates {
        let slot = match role {
            Role::Sample => &mut suggestions.sample,
            Role::Qaqc => &mut suggestions.qaqc,
            Role::Crm => &mut suggestions.crm,
        };
        if slot.is_some() || used.contains(&idx) {
            continue;
        }
        *slot = Some(columns[idx].clone());
        used.push(idx);
    }
    suggestions
}

fn score(column: &str, keywords: &[&str]) -> f64 {
    let words: Vec<&str> = column.split_whitespace().collect();
    let mut best = 0.0f64;
    for keyword in keywords {
        // Short keywords like "id" must match a whole word, not a substring
        // of "Hasta" or "Fecha de envío".
        let contains = if keyword.chars().count() <= 3 {
            words.contains(keyword)
        } else {
            column.contains(keyword)
        };
        if contains {
            return 1.0;
        }
        for word in &words {
            best = best.max(jaro_winkler::similarity(word.chars(), keyword.chars()));
        }
    }
    best
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\', '°', 'º', '#'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
