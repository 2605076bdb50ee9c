//! Synthetic power readings for the playback runner and integration tests.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::FeedSection;

/// One set of instantaneous meter readings in watts.
///
/// Sign conventions match the meter's `update` contract:
/// - `grid_w`: positive = import, negative = export
/// - `pv_w`: non-negative generation
/// - `battery_w`: positive = discharge, negative = charge
/// - `charge_w`: non-negative power into the tracked load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerReadings {
    pub grid_w: f64,
    pub pv_w: f64,
    pub battery_w: f64,
    pub charge_w: f64,
}

/// Generates a plausible household power trace.
///
/// PV follows a half-sine day arc between sunrise and sunset with Gaussian
/// noise. The battery absorbs PV surplus and covers deficits up to its power
/// limit; the grid closes the remaining balance. Deterministic for a fixed
/// seed.
#[derive(Debug, Clone)]
pub struct Feed {
    params: FeedSection,
    rng: StdRng,
}

impl Feed {
    /// Creates a feed from validated config parameters and a seed.
    pub fn new(params: FeedSection, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the readings at `time_hr` hours since the start of the trace.
    ///
    /// Times past 24 h wrap around into the next day.
    pub fn readings(&mut self, time_hr: f64) -> PowerReadings {
        let p = &self.params;

        let pv_w = {
            let ideal = p.pv_peak_w * daylight_frac(time_hr, p.sunrise_hr, p.sunset_hr);
            if ideal > 0.0 {
                (ideal + gaussian_noise(&mut self.rng, p.noise_std_w)).max(0.0)
            } else {
                0.0
            }
        };

        let consumption_w = p.base_load_w + p.charge_power_w;
        let surplus_w = pv_w - consumption_w;

        // Battery soaks up surplus or covers deficit within its power limit.
        let battery_w = if surplus_w > 0.0 {
            -surplus_w.min(p.battery_limit_w)
        } else {
            (-surplus_w).min(p.battery_limit_w)
        };

        // Grid closes the balance: consumption = pv + battery + grid.
        let grid_w = consumption_w - pv_w - battery_w;

        PowerReadings {
            grid_w,
            pv_w,
            battery_w,
            charge_w: p.charge_power_w,
        }
    }
}

/// Height of the half-sine PV day arc at `time_hr`, in `[0.0, 1.0]`.
///
/// Zero outside the sunrise/sunset window.
fn daylight_frac(time_hr: f64, sunrise_hr: f64, sunset_hr: f64) -> f64 {
    let hour = time_hr.rem_euclid(24.0);
    if hour < sunrise_hr || hour >= sunset_hr {
        return 0.0;
    }
    let frac = (hour - sunrise_hr) / (sunset_hr - sunrise_hr);
    (std::f64::consts::PI * frac).sin().max(0.0)
}

/// Gaussian noise via the Box-Muller transform, mean 0.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
