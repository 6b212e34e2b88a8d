//! The scanning station: one owned registry behind one lock.
//!
//! Every mutation (load, configure, scan, skip-ahead, reset) takes the write
//! lock, so two scans of the same barcode always resolve to one `Success`
//! and one `DuplicateRejected`. Reads share the read lock. Decoding and
//! normalization run before the write lock is taken; the lock only guards
//! the in-memory swap.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use intake_ingest::{ManifestFormat, ManifestSource, PolarsCsvDecoder, TabularDecoder};
use intake_model::{
    ConfigureSummary, Configuration, RegistryStats, SampleRecord, SampleSummary, SampleTable,
    ScanLogEntry, ScanOutcome, SkipResult,
};
use intake_normalization::{ColumnSuggestions, normalize_columns, normalize_manifest, suggest_columns};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StationError};
use crate::registry::SampleRegistry;

/// Identifies a loaded manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestHandle {
    pub filename: String,
    pub format: ManifestFormat,
    pub fingerprint: String,
}

/// The table handed to an export encoder.
#[derive(Debug, Clone)]
pub struct TableExport {
    /// Name of the uploaded manifest.
    pub source_filename: String,
    pub table: SampleTable,
}

#[derive(Default)]
struct StationState {
    manifest: Option<ManifestSource>,
    registry: Option<SampleRegistry>,
}

pub struct ScanStation {
    state: RwLock<StationState>,
    decoder: Box<dyn TabularDecoder>,
    clock: Arc<dyn Clock>,
}

impl ScanStation {
    /// A station reading delimited manifests and stamping local time.
    pub fn new() -> Self {
        Self::with_parts(Box::new(PolarsCsvDecoder::new()), Arc::new(SystemClock))
    }

    pub fn with_parts(decoder: Box<dyn TabularDecoder>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(StationState::default()),
            decoder,
            clock,
        }
    }

    /// Replaces the session's manifest bytes; clears any configured table.
    pub fn load_manifest(
        &self,
        filename: &str,
        declared_extension: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<ManifestHandle> {
        let source = ManifestSource::new(filename, declared_extension, bytes)?;
        let handle = ManifestHandle {
            filename: source.filename().to_string(),
            format: source.format(),
            fingerprint: source.fingerprint().to_string(),
        };
        let mut state = self.write();
        state.manifest = Some(source);
        state.registry = None;
        info!(filename = %handle.filename, fingerprint = %handle.fingerprint, "manifest loaded");
        Ok(handle)
    }

    /// Normalized column names at `header_row`.
    pub fn peek_columns(&self, header_row: usize) -> Result<Vec<String>> {
        let source = self.manifest()?;
        let raw = self.decoder.columns(&source, header_row)?;
        Ok(normalize_columns(&raw))
    }

    /// Column names plus suggested sample/QAQC/CRM picks.
    pub fn suggest_columns(&self, header_row: usize) -> Result<(Vec<String>, ColumnSuggestions)> {
        let columns = self.peek_columns(header_row)?;
        let suggestions = suggest_columns(&columns);
        Ok((columns, suggestions))
    }

    /// Builds the sample table and swaps it in.
    ///
    /// On any failure the previous table (if any) stays in place.
    pub fn configure(&self, config: Configuration) -> Result<ConfigureSummary> {
        config.validate()?;
        let source = self.manifest()?;
        let raw = self.decoder.decode(&source, config.header_row)?;
        let normalized = normalize_manifest(&raw, &config)?;

        let registry = SampleRegistry::new(normalized.table, config);
        let summary = ConfigureSummary {
            total: registry.table().len(),
            stats: registry.stats(),
            next_sample: registry.next_unscanned(),
            dropped_rows: normalized.dropped_rows,
            duplicate_ids: normalized.duplicate_ids,
        };

        let mut state = self.write();
        let unchanged = state
            .manifest
            .as_ref()
            .is_some_and(|current| current.fingerprint() == source.fingerprint());
        if !unchanged {
            return Err(StationError::ManifestChanged);
        }
        state.registry = Some(registry);
        drop(state);

        info!(
            filename = %source.filename(),
            total = summary.total,
            scanned = summary.stats.scanned,
            dropped_rows = summary.dropped_rows,
            duplicates = summary.duplicate_ids.len(),
            "manifest configured"
        );
        Ok(summary)
    }

    pub fn scan(&self, barcode: &str, operator: &str) -> Result<ScanOutcome> {
        let mut state = self.write();
        let registry = configured_mut(&mut state, "scan")?;
        Ok(registry.scan(barcode, operator, self.clock.as_ref()))
    }

    pub fn set_start_index(&self, target_id: &str) -> Result<SkipResult> {
        let mut state = self.write();
        let registry = configured_mut(&mut state, "skip-ahead")?;
        registry.skip_to(target_id, self.clock.as_ref())
    }

    pub fn stats(&self) -> Result<RegistryStats> {
        self.read_registry("stats", SampleRegistry::stats)
    }

    pub fn next_sample(&self) -> Result<Option<SampleSummary>> {
        self.read_registry("next sample", SampleRegistry::next_unscanned)
    }

    /// All records in table order.
    pub fn snapshot(&self) -> Result<Vec<SampleRecord>> {
        self.read_registry("snapshot", |registry| registry.table().records().to_vec())
    }

    /// Column order for full-table views, priority columns first.
    pub fn display_columns(&self) -> Result<Vec<String>> {
        self.read_registry("snapshot", |registry| registry.table().display_columns())
    }

    pub fn recent_scans(&self) -> Result<Vec<ScanLogEntry>> {
        self.read_registry("recent scans", SampleRegistry::recent_scans)
    }

    /// A copy of the current table for the export encoder.
    pub fn export_table(&self) -> Result<TableExport> {
        let state = self.read();
        let registry = configured(&state, "export")?;
        let source_filename = state
            .manifest
            .as_ref()
            .map(|source| source.filename().to_string())
            .unwrap_or_default();
        let export = TableExport {
            source_filename,
            table: registry.table().clone(),
        };
        debug!(records = export.table.len(), "table exported");
        Ok(export)
    }

    /// Drops the manifest, table, configuration and scan log.
    pub fn reset(&self) {
        let mut state = self.write();
        *state = StationState::default();
        info!("station reset");
    }

    pub fn is_configured(&self) -> bool {
        self.read().registry.is_some()
    }

    fn manifest(&self) -> Result<ManifestSource> {
        self.read().manifest.clone().ok_or(StationError::NoManifest)
    }

    fn read_registry<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&SampleRegistry) -> T,
    ) -> Result<T> {
        let state = self.read();
        Ok(f(configured(&state, operation)?))
    }

    // A poisoned lock still holds a consistent table: each record
    // transition is a single assignment that cannot be observed half-done.
    fn read(&self) -> RwLockReadGuard<'_, StationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ScanStation {
    fn default() -> Self {
        Self::new()
    }
}

fn configured<'a>(state: &'a StationState, operation: &'static str) -> Result<&'a SampleRegistry> {
    state
        .registry
        .as_ref()
        .ok_or(StationError::StateUnconfigured { operation })
}

fn configured_mut<'a>(
    state: &'a mut StationState,
    operation: &'static str,
) -> Result<&'a mut SampleRegistry> {
    state
        .registry
        .as_mut()
        .ok_or(StationError::StateUnconfigured { operation })
}
