//! Playback runner — drives the savings meter over a simulated day.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use savings_meter::cli::{self, CliOptions};
use savings_meter::clock::ManualClock;
use savings_meter::config::RunConfig;
use savings_meter::feed::Feed;
use savings_meter::flow::self_consumption_share;
use savings_meter::savings::SavingsMeter;
use savings_meter::telemetry::{SampleRow, export_csv};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            cli::print_usage();
            process::exit(2);
        }
    };

    let config = match load_config(&opts) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(2);
    }

    run(&config, &opts);
}

fn load_config(opts: &CliOptions) -> Result<RunConfig, String> {
    let mut config = if let Some(path) = &opts.config {
        RunConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(name) = &opts.preset {
        RunConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        RunConfig::baseline()
    };

    if let Some(steps) = opts.steps {
        config.run.steps = steps;
    }
    if let Some(seed) = opts.seed {
        config.run.seed = seed;
    }

    Ok(config)
}

fn run(config: &RunConfig, opts: &CliOptions) {
    let interval = Duration::from_secs(config.run.interval_secs);
    let interval_hr = config.run.interval_secs as f64 / 3600.0;

    let clock = Arc::new(ManualClock::new());
    let mut meter = SavingsMeter::new(clock.clone());
    let mut feed = Feed::new(config.feed.clone(), config.run.seed);

    info!(
        steps = config.run.steps,
        interval_secs = config.run.interval_secs,
        seed = config.run.seed,
        "starting playback"
    );

    let mut rows = Vec::with_capacity(config.run.steps);
    for step in 0..config.run.steps {
        clock.advance(interval);
        let elapsed_hr = (step + 1) as f64 * interval_hr;

        let r = feed.readings(elapsed_hr);
        meter.update(r.grid_w, r.pv_w, r.battery_w, r.charge_w);

        let snap = meter.snapshot();
        let row = SampleRow {
            step,
            elapsed_hr,
            grid_w: r.grid_w,
            pv_w: r.pv_w,
            battery_w: r.battery_w,
            charge_w: r.charge_w,
            share_pct: self_consumption_share(r.grid_w, r.pv_w, r.battery_w),
            charged_kwh: snap.charged_total_kwh,
            self_kwh: snap.charged_self_kwh,
            self_pct: snap.self_consumption_pct,
        };
        println!("{row}");
        rows.push(row);
    }

    let snap = meter.snapshot();
    println!("\n--- Savings Summary ---");
    println!("Elapsed:            {:.1} h", snap.since_start.as_secs_f64() / 3600.0);
    println!("Charged total:      {:.2} kWh", snap.charged_total_kwh);
    println!("Self-produced:      {:.2} kWh", snap.charged_self_kwh);
    println!("Self-consumption:   {:.1} %", snap.self_consumption_pct);

    if let Some(path) = &opts.telemetry_out {
        match export_csv(&rows, path) {
            Ok(()) => info!(path = %path.display(), "telemetry written"),
            Err(err) => {
                eprintln!("error: failed to write telemetry: {err}");
                process::exit(1);
            }
        }
    }
}
