//! Turns decoded manifest rows into the canonical sample table.

use std::collections::BTreeMap;

use intake_ingest::RawTable;
use intake_model::columns;
use intake_model::{CellValue, Configuration, DuplicatePolicy, SampleRecord, SampleTable};
use tracing::{debug, warn};

use crate::columns::{normalize_column_name, normalize_columns};
use crate::error::{NormalizeError, Result};
use crate::flags::parse_flag;
use crate::identifier::normalize_identifier;

/// A normalized table plus what was filtered on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedManifest {
    pub table: SampleTable,
    /// Data rows without a usable identifier.
    pub dropped_rows: usize,
    /// Identifiers that occur more than once.
    pub duplicate_ids: Vec<String>,
}

/// Where each canonical field comes from in the source row.
#[derive(Debug, Default)]
struct SourceLayout {
    sample: usize,
    qaqc: Option<usize>,
    crm: Option<usize>,
    scanned: Option<usize>,
    scan_date: Option<usize>,
    scan_time: Option<usize>,
    scanned_by: Option<usize>,
    /// Pass-through columns: (source index, output name).
    extra: Vec<(usize, String)>,
    /// Output column order.
    columns: Vec<String>,
}

/// Builds the sample table from decoded rows and a configuration.
///
/// Nothing outside the returned value is touched, so a failure leaves any
/// previously loaded table intact.
pub fn normalize_manifest(raw: &RawTable, config: &Configuration) -> Result<NormalizedManifest> {
    let names = normalize_columns(&raw.columns);
    let layout = resolve_layout(&names, config)?;

    let skip = config.rows_to_skip();
    let mut records = Vec::with_capacity(raw.len().saturating_sub(skip));
    let mut dropped_rows = 0usize;

    for (offset, row) in raw.rows.iter().enumerate().skip(skip) {
        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
        let Some(sample_id) = normalize_identifier(cell(layout.sample), config.identifier_rule)
        else {
            dropped_rows += 1;
            debug!(
                row = config.header_row + 1 + offset,
                value = cell(layout.sample),
                "dropped row without sample identifier"
            );
            continue;
        };

        let optional = |idx: Option<usize>| idx.map_or(CellValue::Absent, |i| CellValue::trimmed(cell(i)));
        let scanned = layout.scanned.is_some_and(|idx| parse_flag(cell(idx)));

        let mut record = SampleRecord::new(sample_id, config.shipment_number.clone())
            .with_scan_state(
                scanned,
                optional(layout.scan_date),
                optional(layout.scan_time),
                optional(layout.scanned_by),
            );
        record.qaqc_type = optional(layout.qaqc);
        record.crm_type = optional(layout.crm);
        record.extra = layout
            .extra
            .iter()
            .map(|(idx, name)| (name.clone(), CellValue::from_raw(cell(*idx))))
            .collect::<BTreeMap<_, _>>();
        records.push(record);
    }

    let table = SampleTable::new(layout.columns, records);
    let duplicate_ids = table.duplicate_ids();
    if !duplicate_ids.is_empty() {
        if config.duplicate_policy == DuplicatePolicy::Reject {
            return Err(NormalizeError::DuplicateIdentifiers { ids: duplicate_ids });
        }
        warn!(
            count = duplicate_ids.len(),
            ids = %duplicate_ids.join(", "),
            "manifest has duplicate sample identifiers; lookups use the first match"
        );
    }

    debug!(
        records = table.len(),
        dropped_rows,
        skipped_leading = skip,
        "normalized manifest"
    );
    Ok(NormalizedManifest {
        table,
        dropped_rows,
        duplicate_ids,
    })
}

fn resolve_layout(names: &[String], config: &Configuration) -> Result<SourceLayout> {
    let position = |name: &str| names.iter().position(|column| column == name);
    let declared = |name: &Option<String>, role: &str| -> Option<usize> {
        let wanted = normalize_column_name(name.as_deref()?);
        let found = position(&wanted);
        if found.is_none() {
            warn!(column = %wanted, role, "declared column not found; ignoring");
        }
        found
    };

    let sample_name = normalize_column_name(&config.columns.sample_column);
    let sample = position(&sample_name).ok_or_else(|| NormalizeError::ColumnNotFound {
        column: sample_name.clone(),
        available: names.to_vec(),
    })?;
    // Without a declared mapping, a re-imported export still carries its
    // canonical classification columns.
    let qaqc = declared(&config.columns.qaqc_column, "qaqc")
        .or_else(|| position(columns::QAQC_TYPE))
        .filter(|idx| *idx != sample);
    let crm = declared(&config.columns.crm_column, "crm")
        .or_else(|| position(columns::CRM_TYPE))
        .filter(|idx| *idx != sample && Some(*idx) != qaqc);

    let mut layout = SourceLayout {
        sample,
        qaqc,
        crm,
        scanned: position(columns::SCANNED),
        scan_date: position(columns::SCAN_DATE),
        scan_time: position(columns::SCAN_TIME),
        scanned_by: position(columns::SCANNED_BY),
        ..SourceLayout::default()
    };

    for (idx, name) in names.iter().enumerate() {
        let output = if idx == sample {
            columns::SAMPLE_ID
        } else if Some(idx) == qaqc {
            columns::QAQC_TYPE
        } else if Some(idx) == crm {
            columns::CRM_TYPE
        } else if columns::is_canonical(name) {
            // A canonical name on a column that lost its role to a mapped
            // column (e.g. an old `QAQC Type` next to a newly chosen one).
            if [columns::SAMPLE_ID, columns::QAQC_TYPE, columns::CRM_TYPE].contains(&name.as_str())
            {
                warn!(column = %name, "dropping column shadowed by mapped column");
                continue;
            }
            name.as_str()
        } else {
            layout.extra.push((idx, name.clone()));
            name.as_str()
        };
        layout.columns.push(output.to_string());
    }

    for control in columns::CONTROL_COLUMNS {
        if !layout.columns.iter().any(|column| column == control) {
            layout.columns.push(control.to_string());
        }
    }
    Ok(layout)
}
