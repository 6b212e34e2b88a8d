//! Line-oriented scanning session over a configured station.
//!
//! Each input line is one of:
//!
//! - a barcode, scanned as-is
//! - `>ID`, skip ahead so scanning resumes at `ID`
//! - `?`, current counters, next sample and recent scans
//! - `!`, the full table
//!
//! Blank lines are ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_core::{ScanStation, StationError};
use intake_model::{
    RegistryStats, SampleRecord, SampleSummary, ScanLogEntry, ScanOutcome, SkipResult,
};
use intake_output::{TableEncoder, write_export, write_table};
use serde::Serialize;
use tracing::{debug, info};

use crate::logging::redact_value;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Scan(String),
    SkipTo(String),
    Status,
    Snapshot,
}

impl SessionCommand {
    /// Parses one input line; `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let command = match line {
            "?" => Self::Status,
            "!" => Self::Snapshot,
            _ => match line.strip_prefix('>') {
                Some(target) => Self::SkipTo(target.trim().to_string()),
                None => Self::Scan(line.to_string()),
            },
        };
        Some(command)
    }
}

/// What a command produced, ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Scan(ScanOutcome),
    Skip(SkipResult),
    /// A skip-ahead target that is not in the manifest.
    SkipTargetMissing { target: String },
    Status {
        stats: RegistryStats,
        next_sample: Option<SampleSummary>,
        recent: Vec<ScanLogEntry>,
    },
    Snapshot {
        columns: Vec<String>,
        records: Vec<SampleRecord>,
    },
}

/// Drives a configured station from input lines.
pub struct Session<'a> {
    station: &'a ScanStation,
    operator: String,
}

impl<'a> Session<'a> {
    /// `operator` is used when the configuration names none.
    pub fn new(station: &'a ScanStation, operator: impl Into<String>) -> Self {
        Self {
            station,
            operator: operator.into(),
        }
    }

    pub fn handle_line(&self, line: &str) -> Result<Option<SessionEvent>> {
        match SessionCommand::parse(line) {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&self, command: SessionCommand) -> Result<SessionEvent> {
        let event = match command {
            SessionCommand::Scan(barcode) => {
                debug!(barcode = %barcode, operator = redact_value(&self.operator), "scan");
                SessionEvent::Scan(self.station.scan(&barcode, &self.operator)?)
            }
            SessionCommand::SkipTo(target) => match self.station.set_start_index(&target) {
                Ok(result) => SessionEvent::Skip(result),
                Err(StationError::NotFound { sample_id }) => {
                    SessionEvent::SkipTargetMissing { target: sample_id }
                }
                Err(err) => return Err(err).context("skip ahead"),
            },
            SessionCommand::Status => SessionEvent::Status {
                stats: self.station.stats()?,
                next_sample: self.station.next_sample()?,
                recent: self.station.recent_scans()?,
            },
            SessionCommand::Snapshot => SessionEvent::Snapshot {
                columns: self.station.display_columns()?,
                records: self.station.snapshot()?,
            },
        };
        Ok(event)
    }

    /// Writes the table. `output` is a file path; without it the export is
    /// placed next to `input` as `scanned_<name>`.
    pub fn finish(
        &self,
        input: &Path,
        output: Option<&Path>,
        encoder: &dyn TableEncoder,
    ) -> Result<PathBuf> {
        let export = self.station.export_table()?;
        let path = match output {
            Some(path) => {
                write_table(path, &export.table, encoder)
                    .with_context(|| format!("write {}", path.display()))?;
                path.to_path_buf()
            }
            None => {
                let dir = input.parent().unwrap_or_else(|| Path::new("."));
                write_export(dir, &export.source_filename, &export.table, encoder)
                    .context("write export")?
            }
        };
        let stats = export.table.stats();
        info!(
            path = %path.display(),
            scanned = stats.scanned,
            missing = stats.missing,
            "session finished"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(SessionCommand::parse("   "), None);
        assert_eq!(
            SessionCommand::parse(" 85990 "),
            Some(SessionCommand::Scan("85990".to_string()))
        );
        assert_eq!(
            SessionCommand::parse(">  85992"),
            Some(SessionCommand::SkipTo("85992".to_string()))
        );
        assert_eq!(SessionCommand::parse("?"), Some(SessionCommand::Status));
        assert_eq!(SessionCommand::parse("!"), Some(SessionCommand::Snapshot));
    }

    #[test]
    fn outcome_is_unconfigured_without_manifest() {
        let station = ScanStation::new();
        let err = Session::new(&station, "alice")
            .handle_line("85990")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StationError>(),
            Some(StationError::StateUnconfigured { .. })
        ));
    }

    #[test]
    fn scan_event_serializes_with_both_tags() {
        let outcome = ScanOutcome::NotFound {
            barcode: "1".to_string(),
            stats: RegistryStats::default(),
            next_sample: None,
        };
        let json = serde_json::to_value(SessionEvent::Scan(outcome)).unwrap();
        assert_eq!(json["event"], "scan");
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["barcode"], "1");
    }
}
