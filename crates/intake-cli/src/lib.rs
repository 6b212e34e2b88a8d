//! CLI library components for the intake scanning station.

pub mod logging;
pub mod session;
