//! Canonical column names shared by normalization, the registry and export.
//!
//! These names are written on export and recognized again on re-import, so
//! they must never change between releases.

/// Canonical sample identifier column.
pub const SAMPLE_ID: &str = "Sample ID";
/// QAQC classification column.
pub const QAQC_TYPE: &str = "QAQC Type";
/// CRM classification column.
pub const CRM_TYPE: &str = "CRM Type";
/// Shipment number stamped on every record.
pub const SHIPMENT_NUMBER: &str = "Shipment Number";
/// Scanned flag column, exported as `TRUE`/`FALSE`.
pub const SCANNED: &str = "Scanned";
/// Scan date column (`%Y-%m-%d`).
pub const SCAN_DATE: &str = "Scan Date";
/// Scan time column (`%H:%M:%S`).
pub const SCAN_TIME: &str = "Scan Time";
/// Operator column.
pub const SCANNED_BY: &str = "Scanned By";

/// Display label for records without a QAQC classification.
pub const NORMAL_SAMPLE_LABEL: &str = "Normal Sample";

/// Operator recorded on records force-scanned by a skip-ahead.
pub const SKIPPED_OPERATOR: &str = "OMITIDO";

/// Control columns appended to a manifest when missing, in append order.
pub const CONTROL_COLUMNS: [&str; 7] = [
    QAQC_TYPE,
    CRM_TYPE,
    SHIPMENT_NUMBER,
    SCANNED,
    SCAN_DATE,
    SCAN_TIME,
    SCANNED_BY,
];

/// Columns shown first in full-table views.
pub const PRIORITY_COLUMNS: [&str; 6] =
    [SAMPLE_ID, QAQC_TYPE, CRM_TYPE, SCANNED, SCAN_DATE, SCAN_TIME];

/// Returns true when `name` is one of the canonical columns.
pub fn is_canonical(name: &str) -> bool {
    name == SAMPLE_ID || CONTROL_COLUMNS.contains(&name)
}
