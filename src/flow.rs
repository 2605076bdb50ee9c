//! Instantaneous self-consumption share computation.

/// Computes the share of the current power flow covered by self-produced
/// sources, in percent.
///
/// All inputs are instantaneous readings in watts:
/// - `grid_w` - grid power (positive = import, negative = export)
/// - `pv_w` - PV generation (conventionally non-negative)
/// - `battery_w` - battery power (positive = discharge, negative = charge)
///
/// Charging the battery from on-site surplus and discharging it to meet
/// demand both count as self-consumption; grid import dilutes the share.
/// PV power exported to the grid or diverted into the battery is excluded
/// via the `pv_consumption` term.
///
/// # Returns
///
/// A value in `[0.0, 100.0]`. Returns `0.0` when there is no flow at all
/// (zero denominator) instead of propagating NaN.
pub fn self_consumption_share(grid_w: f64, pv_w: f64, battery_w: f64) -> f64 {
    let battery_discharge = battery_w.max(0.0);
    let battery_charge = (-battery_w).max(0.0);
    let pv_consumption = pv_w.min(pv_w + grid_w - battery_charge);

    let grid_import = grid_w.max(0.0);
    let self_consumption = (battery_discharge + pv_consumption + battery_charge).max(0.0);

    let share = 100.0 / (grid_import + self_consumption) * self_consumption;

    if share.is_nan() { 0.0 } else { share }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flow_yields_zero_not_nan() {
        let share = self_consumption_share(0.0, 0.0, 0.0);
        assert_eq!(share, 0.0);
    }

    #[test]
    fn pure_pv_is_fully_self_consumed() {
        let share = self_consumption_share(0.0, 5.0, 0.0);
        assert_eq!(share, 100.0);
    }

    #[test]
    fn pure_grid_import_is_zero() {
        let share = self_consumption_share(5.0, 0.0, 0.0);
        assert_eq!(share, 0.0);
    }

    #[test]
    fn battery_discharge_counts_as_self_consumption() {
        let share = self_consumption_share(0.0, 0.0, 3000.0);
        assert_eq!(share, 100.0);
    }

    #[test]
    fn battery_charging_from_surplus_counts_as_self_consumption() {
        // 4 kW PV, 1 kW into the battery, rest consumed on site.
        let share = self_consumption_share(0.0, 4000.0, -1000.0);
        assert_eq!(share, 100.0);
    }

    #[test]
    fn grid_import_dilutes_the_share() {
        // 2 kW PV consumed on site, 2 kW imported: half self-produced.
        let share = self_consumption_share(2000.0, 2000.0, 0.0);
        assert!((share - 50.0).abs() < 1e-9);
    }

    #[test]
    fn export_does_not_inflate_the_share() {
        // 5 kW PV, 3 kW exported: only the 2 kW consumed on site count,
        // but with no import the share is still 100%.
        let share = self_consumption_share(-3000.0, 5000.0, 0.0);
        assert_eq!(share, 100.0);
    }

    #[test]
    fn share_is_bounded_for_mixed_inputs() {
        let cases = [
            (1234.0, 567.0, -89.0),
            (-1500.0, 3200.0, 400.0),
            (0.0, 0.0, -250.0),
            (10_000.0, 0.1, 0.0),
            (-0.5, 0.0, 0.0),
        ];
        for (grid_w, pv_w, battery_w) in cases {
            let share = self_consumption_share(grid_w, pv_w, battery_w);
            assert!(
                (0.0..=100.0).contains(&share),
                "share {share} out of range for ({grid_w}, {pv_w}, {battery_w})"
            );
        }
    }
}
