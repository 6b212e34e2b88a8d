//! Results returned by registry operations.

use serde::{Deserialize, Serialize};

use crate::record::SampleRecord;
use crate::stats::RegistryStats;
use crate::value::CellValue;

/// The "what to scan next" view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub sample_id: String,
    /// QAQC label, `Normal Sample` when absent.
    pub qaqc_type: String,
    /// CRM label, empty when absent.
    pub crm_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Success,
    Duplicate,
    NotFound,
}

/// Outcome of one barcode scan. None of the variants is a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Success {
        record: SampleRecord,
        stats: RegistryStats,
        qaqc_type: String,
        crm_type: String,
        next_sample: Option<SampleSummary>,
    },
    #[serde(rename = "duplicate")]
    DuplicateRejected {
        sample_id: String,
        scan_date: CellValue,
        scan_time: CellValue,
        scanned_by: CellValue,
        qaqc_type: String,
        crm_type: String,
        stats: RegistryStats,
        next_sample: Option<SampleSummary>,
    },
    NotFound {
        barcode: String,
        stats: RegistryStats,
        next_sample: Option<SampleSummary>,
    },
}

impl ScanOutcome {
    pub fn status(&self) -> ScanStatus {
        match self {
            Self::Success { .. } => ScanStatus::Success,
            Self::DuplicateRejected { .. } => ScanStatus::Duplicate,
            Self::NotFound { .. } => ScanStatus::NotFound,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn stats(&self) -> RegistryStats {
        match self {
            Self::Success { stats, .. }
            | Self::DuplicateRejected { stats, .. }
            | Self::NotFound { stats, .. } => *stats,
        }
    }

    pub fn next_sample(&self) -> Option<&SampleSummary> {
        match self {
            Self::Success { next_sample, .. }
            | Self::DuplicateRejected { next_sample, .. }
            | Self::NotFound { next_sample, .. } => next_sample.as_ref(),
        }
    }
}

/// Outcome of a skip-ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipResult {
    pub target: String,
    pub skipped: usize,
    pub stats: RegistryStats,
    pub next_sample: Option<SampleSummary>,
}

/// Outcome of a successful configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigureSummary {
    pub total: usize,
    pub stats: RegistryStats,
    pub next_sample: Option<SampleSummary>,
    /// Rows dropped because their identifier was absent or not a sample.
    pub dropped_rows: usize,
    /// Identifiers that occur more than once (kept under `KeepAll`).
    pub duplicate_ids: Vec<String>,
}

/// One entry in the recent-scans log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanLogEntry {
    pub sample_id: String,
    pub status: ScanStatus,
    pub qaqc_type: Option<String>,
    pub date: String,
    pub time: String,
}
