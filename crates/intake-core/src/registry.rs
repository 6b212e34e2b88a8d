//! The sample registry and its state machine.
//!
//! Each record moves `Pending -> Scanned` exactly once, either through a
//! scan or a skip-ahead. Nothing is removed from the table after
//! normalization; only scan fields change.

use intake_model::columns::SKIPPED_OPERATOR;
use intake_model::{
    CellValue, Configuration, RegistryStats, SampleRecord, SampleSummary, SampleTable,
    ScanLogEntry, ScanOutcome, ScanStamp, ScanStatus, SkipResult,
};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::{Result, StationError};
use crate::scan_log::ScanLog;

/// Owns the sample table of one configured manifest.
#[derive(Debug, Clone)]
pub struct SampleRegistry {
    table: SampleTable,
    config: Configuration,
    stats: RegistryStats,
    log: ScanLog,
}

impl SampleRegistry {
    pub fn new(table: SampleTable, config: Configuration) -> Self {
        let stats = table.stats();
        Self {
            table,
            config,
            stats,
            log: ScanLog::default(),
        }
    }

    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log = ScanLog::new(capacity);
        self
    }

    pub fn table(&self) -> &SampleTable {
        &self.table
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Index of the first record with this identifier (trimmed, exact).
    pub fn find_by_identifier(&self, sample_id: &str) -> Option<usize> {
        self.table.position_of(sample_id)
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    /// The earliest pending record in manifest order.
    pub fn next_unscanned(&self) -> Option<SampleSummary> {
        self.table
            .first_pending()
            .map(|(_, record)| record.summary())
    }

    pub fn recent_scans(&self) -> Vec<ScanLogEntry> {
        self.log.entries()
    }

    /// Scans one barcode.
    ///
    /// Unknown barcodes and repeated scans are normal outcomes; neither
    /// mutates the table.
    pub fn scan(&mut self, barcode: &str, operator: &str, clock: &dyn Clock) -> ScanOutcome {
        let barcode = barcode.trim();
        let (date, time) = clock.stamp();

        let Some(index) = self.find_by_identifier(barcode) else {
            debug!(barcode, "barcode not in manifest");
            self.log.push(ScanLogEntry {
                sample_id: barcode.to_string(),
                status: ScanStatus::NotFound,
                qaqc_type: None,
                date,
                time,
            });
            return ScanOutcome::NotFound {
                barcode: barcode.to_string(),
                stats: self.stats,
                next_sample: self.next_unscanned(),
            };
        };

        let operator = self.resolve_operator(operator);
        let Some(record) = self.table.get_mut(index) else {
            // position_of only returns in-range indices
            return ScanOutcome::NotFound {
                barcode: barcode.to_string(),
                stats: self.stats,
                next_sample: self.next_unscanned(),
            };
        };

        let applied = record.mark_scanned(ScanStamp {
            date: date.clone(),
            time: time.clone(),
            operator,
        });
        let record = record.clone();

        if !applied {
            warn!(
                sample_id = record.sample_id(),
                first_scan_date = record.scan_date().cell_text(),
                first_scan_time = record.scan_time().cell_text(),
                "duplicate scan rejected"
            );
            self.log.push(log_entry(&record, ScanStatus::Duplicate, date, time));
            return ScanOutcome::DuplicateRejected {
                sample_id: record.sample_id().to_string(),
                scan_date: record.scan_date().clone(),
                scan_time: record.scan_time().clone(),
                scanned_by: record.scanned_by().clone(),
                qaqc_type: record.qaqc_display(),
                crm_type: record.crm_display(),
                stats: self.stats,
                next_sample: self.next_unscanned(),
            };
        }

        self.stats = self.table.stats();
        debug!(
            sample_id = record.sample_id(),
            scanned = self.stats.scanned,
            missing = self.stats.missing,
            "sample scanned"
        );
        self.log.push(log_entry(&record, ScanStatus::Success, date, time));
        ScanOutcome::Success {
            qaqc_type: record.qaqc_display(),
            crm_type: record.crm_display(),
            record,
            stats: self.stats,
            next_sample: self.next_unscanned(),
        }
    }

    /// Marks every pending record before `target` as skipped so scanning
    /// resumes at `target`.
    ///
    /// The target and everything after it are left alone. When the target
    /// itself is already scanned, the next sample is the true first pending
    /// record, which may not be the target.
    pub fn skip_to(&mut self, target: &str, clock: &dyn Clock) -> Result<SkipResult> {
        let target = target.trim();
        let position =
            self.find_by_identifier(target)
                .ok_or_else(|| StationError::NotFound {
                    sample_id: target.to_string(),
                })?;

        let (date, time) = clock.stamp();
        let mut skipped = 0usize;
        for index in 0..position {
            let Some(record) = self.table.get_mut(index) else {
                break;
            };
            let stamp = ScanStamp {
                date: date.clone(),
                time: time.clone(),
                operator: CellValue::Present(SKIPPED_OPERATOR.to_string()),
            };
            if record.mark_scanned(stamp) {
                skipped += 1;
            }
        }

        self.stats = self.table.stats();
        let next_sample = self.next_unscanned();
        info!(
            target,
            skipped,
            scanned = self.stats.scanned,
            missing = self.stats.missing,
            next = next_sample.as_ref().map_or("", |next| next.sample_id.as_str()),
            "skipped ahead"
        );
        Ok(SkipResult {
            target: target.to_string(),
            skipped,
            stats: self.stats,
            next_sample,
        })
    }

    /// Configured operator first, then the caller's, else absent.
    fn resolve_operator(&self, caller: &str) -> CellValue {
        match self.config.operator() {
            Some(configured) => CellValue::Present(configured.to_string()),
            None => CellValue::trimmed(caller),
        }
    }
}

fn log_entry(record: &SampleRecord, status: ScanStatus, date: String, time: String) -> ScanLogEntry {
    ScanLogEntry {
        sample_id: record.sample_id().to_string(),
        status,
        qaqc_type: Some(record.qaqc_display()),
        date,
        time,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use intake_model::ColumnMapping;

    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(10, 30, 0))
                .unwrap(),
        )
    }

    fn registry(operator: Option<&str>) -> SampleRegistry {
        let records = ["85990", "85991", "85992", "85993"]
            .iter()
            .map(|id| SampleRecord::new(*id, "SH-1"))
            .collect();
        let mut config = Configuration::new(ColumnMapping::new("N° Muestra"), "SH-1");
        if let Some(name) = operator {
            config = config.with_operator(name);
        }
        SampleRegistry::new(SampleTable::new(Vec::new(), records), config)
    }

    #[test]
    fn configured_operator_wins() {
        let mut registry = registry(Some("station-1"));
        let outcome = registry.scan("85990", "alice", &clock());
        let ScanOutcome::Success { record, .. } = outcome else {
            panic!("expected success");
        };
        assert_eq!(record.scanned_by().as_str(), Some("station-1"));
    }

    #[test]
    fn caller_operator_used_without_configured_one() {
        let mut registry = registry(None);
        let ScanOutcome::Success { record, .. } = registry.scan(" 85990 ", " alice ", &clock())
        else {
            panic!("expected success");
        };
        assert_eq!(record.scanned_by().as_str(), Some("alice"));
        assert_eq!(record.scan_date().as_str(), Some("2024-05-01"));
        assert_eq!(record.scan_time().as_str(), Some("10:30:00"));
    }

    #[test]
    fn log_records_every_outcome() {
        let mut registry = registry(None).with_log_capacity(2);
        registry.scan("85990", "a", &clock());
        registry.scan("85990", "a", &clock());
        registry.scan("00000", "a", &clock());
        let statuses: Vec<ScanStatus> = registry.recent_scans().iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![ScanStatus::NotFound, ScanStatus::Duplicate]);
    }

    #[test]
    fn skip_to_unknown_target_changes_nothing() {
        let mut registry = registry(None);
        let before = registry.table().clone();
        let err = registry.skip_to("12345", &clock()).unwrap_err();
        assert!(matches!(err, StationError::NotFound { .. }));
        assert_eq!(registry.table(), &before);
    }

    #[test]
    fn skip_to_already_scanned_target_reports_true_next() {
        let mut registry = registry(None);
        registry.skip_to("85992", &clock()).unwrap();
        registry.scan("85992", "a", &clock());
        let result = registry.skip_to("85992", &clock()).unwrap();
        assert_eq!(result.skipped, 0);
        assert_eq!(result.next_sample.unwrap().sample_id, "85993");
    }
}
