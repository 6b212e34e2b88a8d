//! Sample intake data model.
//!
//! Types shared by every stage: the normalized [`SampleRecord`], the ordered
//! [`SampleTable`] acting as the scan queue, derived [`RegistryStats`], the
//! load [`Configuration`], and the results handed back to callers.

pub mod columns;
pub mod config;
pub mod record;
pub mod result;
pub mod stats;
pub mod table;
pub mod value;

pub use config::{ColumnMapping, ConfigError, Configuration, DuplicatePolicy, IdentifierRule};
pub use record::{SampleRecord, ScanStamp};
pub use result::{
    ConfigureSummary, SampleSummary, ScanLogEntry, ScanOutcome, ScanStatus, SkipResult,
};
pub use stats::RegistryStats;
pub use table::SampleTable;
pub use value::{ABSENT_MARKERS, CellValue, is_absent_marker};
