//! Long-running energy accounting for a charging load.
//!
//! [`SavingsMeter`] integrates periodic power samples into two lifetime
//! accumulators: total energy delivered to the load, and the portion of it
//! covered by self-produced supply (PV and battery). An external scheduler
//! calls [`SavingsMeter::update`] at its own cadence; accessors are safe to
//! poll at any time.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::Clock;
use crate::flow::self_consumption_share;

/// Scale factor from watt-hours to kilowatt-hours.
const WH_PER_KWH: f64 = 1000.0;

const SECS_PER_HOUR: f64 = 3600.0;

/// Accumulated charging energy and its self-produced share.
///
/// Energy is estimated under a flat-power assumption: the charge power read
/// at each update is taken as constant over the elapsed interval, so accuracy
/// depends on the caller's update cadence. The self-produced share of each
/// interval likewise uses the instantaneous readings sampled at the
/// interval's end.
///
/// The meter holds no internal synchronization. It expects a single mutator;
/// concurrent readers need external locking around the whole meter, or
/// should consume [`SavingsMeter::snapshot`] values taken under that lock,
/// since the two accumulators are only consistent when read together.
pub struct SavingsMeter {
    clock: Arc<dyn Clock>,
    started: Instant,
    updated: Instant,
    charged_total_kwh: f64,
    charged_self_kwh: f64,
}

/// One consistent read of all derived meter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsSnapshot {
    /// Total energy delivered to the load since start (kWh).
    pub charged_total_kwh: f64,
    /// Self-produced portion of the total (kWh).
    pub charged_self_kwh: f64,
    /// Lifetime self-consumption percentage.
    pub self_consumption_pct: f64,
    /// Elapsed time since the meter was constructed.
    pub since_start: Duration,
}

impl SavingsMeter {
    /// Creates a meter anchored at the clock's current instant with both
    /// accumulators at zero.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            clock,
            started: now,
            updated: now,
            charged_total_kwh: 0.0,
            charged_self_kwh: 0.0,
        }
    }

    /// Folds the latest power readings into the lifetime accumulators.
    ///
    /// All inputs are instantaneous readings in watts:
    /// - `grid_w` - grid power (positive = import, negative = export)
    /// - `pv_w` - PV generation (non-negative by convention)
    /// - `battery_w` - battery power (positive = discharge, negative = charge)
    /// - `charge_w` - power currently delivered to the load (non-negative)
    ///
    /// Never fails; physically inconsistent readings are accepted as-is.
    /// The added energy is clamped at zero so a negative `charge_w` cannot
    /// decrease the accumulators.
    pub fn update(&mut self, grid_w: f64, pv_w: f64, battery_w: f64, charge_w: f64) {
        // Assume charge power constant over the interval -> rough estimate.
        let hours = self.clock.since(self.updated).as_secs_f64() / SECS_PER_HOUR;
        let added_kwh = (hours * charge_w / WH_PER_KWH).max(0.0);
        let share = self_consumption_share(grid_w, pv_w, battery_w);

        self.charged_total_kwh += added_kwh;
        self.charged_self_kwh += added_kwh * (share / 100.0);
        self.updated = self.clock.now();

        debug!(
            "{:.1}kWh charged in {:?}",
            self.charged_total_kwh,
            self.since_start()
        );
        debug!(
            "{:.1}kWh own energy ({:.1}%)",
            self.charged_self_kwh,
            self.self_consumption_percentage()
        );
    }

    /// Elapsed time since the meter was constructed.
    pub fn since_start(&self) -> Duration {
        self.clock.since(self.started)
    }

    /// Total energy delivered to the load since start (kWh).
    pub fn total_charged_kwh(&self) -> f64 {
        self.charged_total_kwh
    }

    /// Self-produced portion of the charged total (kWh).
    pub fn total_self_consumed_kwh(&self) -> f64 {
        self.charged_self_kwh
    }

    /// Lifetime self-consumption percentage over the accumulated totals.
    ///
    /// Returns `0.0` before any energy has been charged.
    pub fn self_consumption_percentage(&self) -> f64 {
        if self.charged_total_kwh > 0.0 {
            100.0 * self.charged_self_kwh / self.charged_total_kwh
        } else {
            0.0
        }
    }

    /// Returns all derived values as one consistent snapshot.
    pub fn snapshot(&self) -> SavingsSnapshot {
        SavingsSnapshot {
            charged_total_kwh: self.charged_total_kwh,
            charged_self_kwh: self.charged_self_kwh,
            self_consumption_pct: self.self_consumption_percentage(),
            since_start: self.since_start(),
        }
    }
}
