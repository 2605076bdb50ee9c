//! End-to-end accounting scenarios driven through a manual clock.

mod common;

use common::{hours, meter_with_manual_clock, minutes};

#[test]
fn solar_charging_hour_is_fully_self_produced() {
    let (clock, mut meter) = meter_with_manual_clock();

    clock.advance(hours(1));
    meter.update(0.0, 2000.0, 0.0, 2000.0);

    assert!((meter.total_charged_kwh() - 2.0).abs() < 1e-9);
    assert!((meter.total_self_consumed_kwh() - 2.0).abs() < 1e-9);
    assert!((meter.self_consumption_percentage() - 100.0).abs() < 1e-9);
}

#[test]
fn grid_only_half_hour_adds_no_self_consumption() {
    let (clock, mut meter) = meter_with_manual_clock();

    clock.advance(minutes(30));
    meter.update(0.0, 0.0, 0.0, 1000.0);

    assert!((meter.total_charged_kwh() - 0.5).abs() < 1e-9);
    assert_eq!(meter.total_self_consumed_kwh(), 0.0);
}

#[test]
fn lifetime_percentage_blends_across_intervals() {
    let (clock, mut meter) = meter_with_manual_clock();

    // One hour at 2 kW purely from PV, then one hour at 2 kW purely from grid.
    clock.advance(hours(1));
    meter.update(0.0, 2000.0, 0.0, 2000.0);
    clock.advance(hours(1));
    meter.update(2000.0, 0.0, 0.0, 2000.0);

    assert!((meter.total_charged_kwh() - 4.0).abs() < 1e-9);
    assert!((meter.total_self_consumed_kwh() - 2.0).abs() < 1e-9);
    assert!((meter.self_consumption_percentage() - 50.0).abs() < 1e-9);
}

#[test]
fn battery_discharge_counts_toward_the_self_share() {
    let (clock, mut meter) = meter_with_manual_clock();

    // Evening charge session fed entirely by the home battery.
    clock.advance(hours(2));
    meter.update(0.0, 0.0, 3000.0, 3000.0);

    assert!((meter.total_charged_kwh() - 6.0).abs() < 1e-9);
    assert!((meter.self_consumption_percentage() - 100.0).abs() < 1e-9);
}

#[test]
fn rapid_polling_without_clock_advance_is_idempotent() {
    let (clock, mut meter) = meter_with_manual_clock();

    clock.advance(minutes(5));
    meter.update(500.0, 1500.0, 0.0, 1800.0);
    let total = meter.total_charged_kwh();
    let own = meter.total_self_consumed_kwh();

    for _ in 0..10 {
        meter.update(500.0, 1500.0, 0.0, 1800.0);
    }

    assert_eq!(meter.total_charged_kwh(), total);
    assert_eq!(meter.total_self_consumed_kwh(), own);
}

#[test]
fn totals_are_monotone_over_a_varied_session() {
    let (clock, mut meter) = meter_with_manual_clock();

    let samples = [
        (0.0, 0.0, 0.0, 0.0),
        (7400.0, 0.0, 0.0, 7400.0),
        (3000.0, 4000.0, 400.0, 7400.0),
        (-1200.0, 9000.0, -2500.0, 7400.0),
        (0.0, 0.0, 2500.0, 2500.0),
        (0.0, 0.0, 0.0, 0.0),
    ];

    let mut last_total = 0.0_f64;
    let mut last_own = 0.0_f64;
    for (grid_w, pv_w, battery_w, charge_w) in samples {
        clock.advance(minutes(15));
        meter.update(grid_w, pv_w, battery_w, charge_w);

        let snap = meter.snapshot();
        assert!(snap.charged_total_kwh >= last_total);
        assert!(snap.charged_self_kwh >= last_own);
        assert!(snap.charged_self_kwh <= snap.charged_total_kwh + 1e-12);
        assert!((0.0..=100.0).contains(&snap.self_consumption_pct));
        last_total = snap.charged_total_kwh;
        last_own = snap.charged_self_kwh;
    }
}

#[test]
fn since_start_is_independent_of_updates() {
    let (clock, mut meter) = meter_with_manual_clock();

    clock.advance(hours(3));
    assert_eq!(meter.since_start(), hours(3));

    meter.update(0.0, 1000.0, 0.0, 1000.0);
    clock.advance(hours(1));
    assert_eq!(meter.since_start(), hours(4));
}
