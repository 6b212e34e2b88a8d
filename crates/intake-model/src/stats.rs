use serde::{Deserialize, Serialize};

use crate::record::SampleRecord;

/// Progress counters derived from the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total: usize,
    pub scanned: usize,
    pub missing: usize,
}

impl RegistryStats {
    pub fn from_records(records: &[SampleRecord]) -> Self {
        let total = records.len();
        let scanned = records.iter().filter(|record| record.is_scanned()).count();
        Self {
            total,
            scanned,
            missing: total - scanned,
        }
    }

    /// Fraction of records scanned, 0.0 for an empty table.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.scanned as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.missing == 0
    }
}
