//! Manifest load configuration.
//!
//! A configuration is captured once per manifest load. Re-issuing it
//! replaces the sample table wholesale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which identifier values count as samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierRule {
    /// Any value containing at least one ASCII digit.
    #[default]
    ContainsDigit,
    /// Values that parse as a number; `85990.0` is rewritten to `85990`.
    NumericOnly,
}

/// What `configure` does with repeated sample identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every row; lookups resolve to the first match in table order.
    #[default]
    KeepAll,
    /// Fail the configuration.
    Reject,
}

/// Source columns chosen by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub sample_column: String,
    pub qaqc_column: Option<String>,
    pub crm_column: Option<String>,
}

impl ColumnMapping {
    pub fn new(sample_column: impl Into<String>) -> Self {
        Self {
            sample_column: sample_column.into(),
            qaqc_column: None,
            crm_column: None,
        }
    }

    pub fn with_qaqc(mut self, column: impl Into<String>) -> Self {
        self.qaqc_column = Some(column.into());
        self
    }

    pub fn with_crm(mut self, column: impl Into<String>) -> Self {
        self.crm_column = Some(column.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// 1-based spreadsheet row holding the column names.
    pub header_row: usize,
    /// 1-based spreadsheet row of the first sample.
    pub data_start_row: usize,
    pub columns: ColumnMapping,
    pub shipment_number: String,
    /// Operator captured at configuration time; wins over per-scan operators.
    pub operator_name: Option<String>,
    #[serde(default)]
    pub identifier_rule: IdentifierRule,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Configuration {
    /// Single header row followed directly by data.
    pub fn new(columns: ColumnMapping, shipment_number: impl Into<String>) -> Self {
        Self {
            header_row: 1,
            data_start_row: 2,
            columns,
            shipment_number: shipment_number.into(),
            operator_name: None,
            identifier_rule: IdentifierRule::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_rows(mut self, header_row: usize, data_start_row: usize) -> Self {
        self.header_row = header_row;
        self.data_start_row = data_start_row;
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator_name = Some(operator.into());
        self
    }

    pub fn with_identifier_rule(mut self, rule: IdentifierRule) -> Self {
        self.identifier_rule = rule;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Data rows between the header and the first sample (e.g. a units row).
    pub fn rows_to_skip(&self) -> usize {
        self.data_start_row.saturating_sub(self.header_row + 1)
    }

    /// Configured operator, trimmed, if non-empty.
    pub fn operator(&self) -> Option<&str> {
        self.operator_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.header_row == 0 {
            return Err(ConfigError::HeaderRow);
        }
        if self.data_start_row <= self.header_row {
            return Err(ConfigError::DataStartRow {
                header_row: self.header_row,
                data_start_row: self.data_start_row,
            });
        }
        if self.columns.sample_column.trim().is_empty() {
            return Err(ConfigError::MissingSampleColumn);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("header row must be 1 or greater")]
    HeaderRow,
    #[error("data start row {data_start_row} must come after header row {header_row}")]
    DataStartRow {
        header_row: usize,
        data_start_row: usize,
    },
    #[error("a sample column must be selected")]
    MissingSampleColumn,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Configuration {
        Configuration::new(ColumnMapping::new("N° Muestra"), "S-1")
    }

    #[test]
    fn rows_to_skip_accounts_for_gap() {
        assert_eq!(config().rows_to_skip(), 0);
        assert_eq!(config().with_rows(18, 19).rows_to_skip(), 0);
        assert_eq!(config().with_rows(18, 20).rows_to_skip(), 1);
    }

    #[test]
    fn validate_rejects_bad_rows() {
        assert_eq!(config().with_rows(0, 2).validate(), Err(ConfigError::HeaderRow));
        assert!(matches!(
            config().with_rows(5, 5).validate(),
            Err(ConfigError::DataStartRow { .. })
        ));
        assert!(config().with_rows(3, 4).validate().is_ok());
    }

    #[test]
    fn blank_operator_is_none() {
        assert_eq!(config().with_operator("  ").operator(), None);
        assert_eq!(config().with_operator(" ana ").operator(), Some("ana"));
    }

    #[test]
    fn defaults_deserialize() {
        let json = r#"{"header_row":1,"data_start_row":2,
            "columns":{"sample_column":"ID","qaqc_column":null,"crm_column":null},
            "shipment_number":"7","operator_name":null}"#;
        let parsed: Configuration = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.identifier_rule, IdentifierRule::ContainsDigit);
        assert_eq!(parsed.duplicate_policy, DuplicatePolicy::KeepAll);
    }
}
