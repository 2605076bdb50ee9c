//! CSV export for sampled meter state.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "step,elapsed_hr,grid_w,pv_w,battery_w,charge_w,\
                      share_pct,charged_kwh,self_kwh,self_pct";

/// One sampled row: the readings fed to the meter plus the meter state
/// right after the corresponding update.
#[derive(Debug, Clone)]
pub struct SampleRow {
    /// Playback step index.
    pub step: usize,
    /// Simulated hours since the meter started.
    pub elapsed_hr: f64,
    /// Grid power reading (W; positive = import).
    pub grid_w: f64,
    /// PV generation reading (W).
    pub pv_w: f64,
    /// Battery power reading (W; positive = discharge).
    pub battery_w: f64,
    /// Charge power reading (W).
    pub charge_w: f64,
    /// Instantaneous self-consumption share applied to this interval (%).
    pub share_pct: f64,
    /// Accumulated charged energy after this step (kWh).
    pub charged_kwh: f64,
    /// Accumulated self-produced energy after this step (kWh).
    pub self_kwh: f64,
    /// Lifetime self-consumption percentage after this step.
    pub self_pct: f64,
}

impl fmt::Display for SampleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} ({:>5.1}h) | grid={:>7.0} W  pv={:>7.0} W  bat={:>7.0} W  \
             charge={:>7.0} W | share={:>5.1}% | total={:.2} kWh  own={:.2} kWh ({:.1}%)",
            self.step,
            self.elapsed_hr,
            self.grid_w,
            self.pv_w,
            self.battery_w,
            self.charge_w,
            self.share_pct,
            self.charged_kwh,
            self.self_kwh,
            self.self_pct,
        )
    }
}

/// Exports sampled rows to a CSV file at the given path.
///
/// Writes a header row followed by one data row per sample using the
/// schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[SampleRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes sampled rows as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[SampleRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in rows {
        wtr.write_record(&[
            r.step.to_string(),
            format!("{:.4}", r.elapsed_hr),
            format!("{:.2}", r.grid_w),
            format!("{:.2}", r.pv_w),
            format!("{:.2}", r.battery_w),
            format!("{:.2}", r.charge_w),
            format!("{:.2}", r.share_pct),
            format!("{:.6}", r.charged_kwh),
            format!("{:.6}", r.self_kwh),
            format!("{:.2}", r.self_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
