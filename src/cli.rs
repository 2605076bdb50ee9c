//! Hand-rolled CLI argument parsing for the playback runner.

use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
pub struct CliOptions {
    /// Path to a TOML configuration file.
    pub config: Option<PathBuf>,
    /// Built-in preset name.
    pub preset: Option<String>,
    /// Override for the number of playback steps.
    pub steps: Option<usize>,
    /// Override for the feed random seed.
    pub seed: Option<u64>,
    /// CSV output path for sampled meter state.
    pub telemetry_out: Option<PathBuf>,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a human-readable message for unknown flags, missing values, or
/// conflicting options.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut config = None;
    let mut preset = None;
    let mut steps = None;
    let mut seed = None;
    let mut telemetry_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --config (expected a TOML file path)".to_string()
                })?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.get(i).ok_or_else(|| {
                    "missing value for --preset (expected a preset name)".to_string()
                })?;
                if preset.replace(name.clone()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--steps" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --steps (expected a count)".to_string())?;
                let n: usize = raw
                    .parse()
                    .map_err(|_| format!("invalid value for --steps: {raw}"))?;
                if steps.replace(n).is_some() {
                    return Err("--steps provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --seed (expected a u64)".to_string())?;
                let n: u64 = raw
                    .parse()
                    .map_err(|_| format!("invalid value for --seed: {raw}"))?;
                if seed.replace(n).is_some() {
                    return Err("--seed provided more than once".to_string());
                }
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --telemetry-out (expected a file path)".to_string()
                })?;
                if telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if config.is_some() && preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(CliOptions {
        config,
        preset,
        steps,
        seed,
        telemetry_out,
    })
}

/// Prints CLI usage to stderr.
pub fn print_usage() {
    eprintln!("savings-meter — self-consumption accounting over a simulated day");
    eprintln!();
    eprintln!("Usage: savings-meter [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load runner config from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, sunny, grid_only)");
    eprintln!("  --steps <n>              Override the number of playback steps");
    eprintln!("  --seed <u64>             Override the feed random seed");
    eprintln!("  --telemetry-out <path>   Export sampled meter state to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the baseline preset is used.");
}
