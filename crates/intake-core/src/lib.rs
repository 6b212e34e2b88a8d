//! Sample registry and scanning station.
//!
//! [`SampleRegistry`] holds the state machine over one normalized
//! [`SampleTable`](intake_model::SampleTable). [`ScanStation`] wraps it with
//! manifest loading and configuration behind a single lock, so it can be
//! shared by any number of request handlers.

mod clock;
mod error;
mod registry;
mod scan_log;
mod station;

pub use clock::{Clock, DATE_FORMAT, FixedClock, SystemClock, TIME_FORMAT};
pub use error::{Result, StationError};
pub use registry::SampleRegistry;
pub use scan_log::{DEFAULT_SCAN_LOG_CAPACITY, ScanLog};
pub use station::{ManifestHandle, ScanStation, TableExport};
