//! A single manifest row after normalization.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::result::SampleSummary;
use crate::value::CellValue;

/// Timestamp and operator applied to a record when it leaves `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStamp {
    pub date: String,
    pub time: String,
    pub operator: CellValue,
}

/// One expected sample from the manifest.
///
/// `sample_id` is fixed at construction. Only the scan fields change, and
/// only through [`SampleRecord::mark_scanned`], which applies them together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    sample_id: String,
    pub qaqc_type: CellValue,
    pub crm_type: CellValue,
    pub shipment_number: String,
    scanned: bool,
    scan_date: CellValue,
    scan_time: CellValue,
    scanned_by: CellValue,
    /// Original manifest columns outside the canonical set, keyed by name.
    pub extra: BTreeMap<String, CellValue>,
}

impl SampleRecord {
    /// Creates a pending record.
    pub fn new(sample_id: impl Into<String>, shipment_number: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            qaqc_type: CellValue::Absent,
            crm_type: CellValue::Absent,
            shipment_number: shipment_number.into(),
            scanned: false,
            scan_date: CellValue::Absent,
            scan_time: CellValue::Absent,
            scanned_by: CellValue::Absent,
            extra: BTreeMap::new(),
        }
    }

    /// Restores scan state carried by a re-imported export.
    ///
    /// Used by normalization only; live scans go through `mark_scanned`.
    pub fn with_scan_state(
        mut self,
        scanned: bool,
        scan_date: CellValue,
        scan_time: CellValue,
        scanned_by: CellValue,
    ) -> Self {
        self.scanned = scanned;
        self.scan_date = scan_date;
        self.scan_time = scan_time;
        self.scanned_by = scanned_by;
        self
    }

    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned
    }

    pub fn is_pending(&self) -> bool {
        !self.scanned
    }

    pub fn scan_date(&self) -> &CellValue {
        &self.scan_date
    }

    pub fn scan_time(&self) -> &CellValue {
        &self.scan_time
    }

    pub fn scanned_by(&self) -> &CellValue {
        &self.scanned_by
    }

    /// Transitions `Pending -> Scanned`.
    ///
    /// Returns false and leaves the record untouched when it is already
    /// scanned.
    pub fn mark_scanned(&mut self, stamp: ScanStamp) -> bool {
        if self.scanned {
            return false;
        }
        let ScanStamp {
            date,
            time,
            operator,
        } = stamp;
        self.scanned = true;
        self.scan_date = CellValue::Present(date);
        self.scan_time = CellValue::Present(time);
        self.scanned_by = operator;
        true
    }

    /// QAQC label for display, `Normal Sample` when absent.
    pub fn qaqc_display(&self) -> String {
        self.qaqc_type
            .or_display(columns::NORMAL_SAMPLE_LABEL)
            .to_string()
    }

    /// CRM label for display, empty when absent.
    pub fn crm_display(&self) -> String {
        self.crm_type.cell_text().to_string()
    }

    pub fn summary(&self) -> SampleSummary {
        SampleSummary {
            sample_id: self.sample_id.clone(),
            qaqc_type: self.qaqc_display(),
            crm_type: self.crm_display(),
        }
    }

    /// Cell text for a table column, `None` when absent or unknown.
    pub fn cell(&self, column: &str) -> Option<Cow<'_, str>> {
        let value = match column {
            columns::SAMPLE_ID => return Some(Cow::Borrowed(self.sample_id.as_str())),
            columns::SHIPMENT_NUMBER => return Some(Cow::Borrowed(self.shipment_number.as_str())),
            columns::SCANNED => {
                return Some(Cow::Borrowed(if self.scanned { "TRUE" } else { "FALSE" }));
            }
            columns::QAQC_TYPE => &self.qaqc_type,
            columns::CRM_TYPE => &self.crm_type,
            columns::SCAN_DATE => &self.scan_date,
            columns::SCAN_TIME => &self.scan_time,
            columns::SCANNED_BY => &self.scanned_by,
            other => self.extra.get(other)?,
        };
        value.as_str().map(Cow::Borrowed)
    }
}
