//! Shared test fixtures for integration tests.

use std::sync::Arc;
use std::time::Duration;

use savings_meter::clock::ManualClock;
use savings_meter::savings::SavingsMeter;

/// A fresh meter together with the manual clock that drives it.
pub fn meter_with_manual_clock() -> (Arc<ManualClock>, SavingsMeter) {
    let clock = Arc::new(ManualClock::new());
    let meter = SavingsMeter::new(clock.clone());
    (clock, meter)
}

/// Duration of `n` whole hours.
pub fn hours(n: u64) -> Duration {
    Duration::from_secs(n * 3600)
}

/// Duration of `n` whole minutes.
pub fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}
