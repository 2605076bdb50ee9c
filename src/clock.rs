//! Injectable time source for the savings meter.
//!
//! The meter never calls `Instant::now()` directly; it reads time through a
//! [`Clock`] handle so tests and the playback runner can control elapsed time
//! deterministically.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// Implementors must return non-decreasing instants from [`Clock::now`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use savings_meter::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let t0 = clock.now();
/// clock.advance(Duration::from_secs(60));
/// assert_eq!(clock.since(t0), Duration::from_secs(60));
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Returns the duration elapsed since `earlier`.
    ///
    /// Saturates to zero if `earlier` is ahead of the current instant.
    fn since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Wall-clock implementation backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Used by unit tests and the playback runner to simulate arbitrary sampling
/// cadences without sleeping. Advancing uses interior mutability so a shared
/// `Arc<ManualClock>` can be held by the meter and advanced by the driver.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Instant>,
}

impl ManualClock {
    /// Creates a manual clock anchored at the current wall-clock instant.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Instant::now()),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut current = self.lock();
        *current += step;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Instant> {
        // A poisoned lock only means a panicking reader; the instant itself
        // is always valid.
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero_elapsed() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        assert_eq!(clock.since(t0), Duration::ZERO);
    }

    #[test]
    fn manual_clock_advances_exactly() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        clock.advance(Duration::from_secs(1800));
        clock.advance(Duration::from_secs(1800));
        assert_eq!(clock.since(t0), Duration::from_secs(3600));
    }

    #[test]
    fn since_saturates_for_future_instants() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        let future = t0 + Duration::from_secs(10);
        assert_eq!(clock.since(future), Duration::ZERO);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let t0 = clock.now();
        let t1 = clock.now();
        assert!(t1 >= t0);
    }
}
