//! Self-consumption savings accounting for a monitored charging load.
//!
//! The core is [`savings::SavingsMeter`]: it integrates periodic power
//! samples into lifetime totals of charged energy and the share covered by
//! on-site PV and battery. The remaining modules provide the time source,
//! the pure share computation, and the plumbing for the playback binary.

pub mod cli;
pub mod clock;
pub mod config;
pub mod feed;
pub mod flow;
pub mod savings;
pub mod telemetry;
