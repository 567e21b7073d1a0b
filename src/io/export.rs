//! CSV export for the hourly detail trace and the monthly table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::runner::HourlyDetail;
use crate::sim::types::MonthlySummary;

/// Column header for the hourly detail export.
const HOURLY_HEADER: &str = "hour,hour_of_day,soc_kwh,solar_charged_kwh,grid_charged_kwh,\
                             discharged_kwh,gross_savings,charge_cost,net_balance,\
                             cumulative_savings";

/// Column header for the monthly table export.
const SUMMARY_HEADER: &str = "label,consumption_kwh,surplus_kwh,savings,solar_charged_kwh,\
                              grid_charged_kwh,discharged_kwh,equivalent_full_cycles";

/// Exports the hourly detail trace to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_hourly_csv(detail: &HourlyDetail, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_hourly_csv(detail, io::BufWriter::new(file))
}

/// Writes the hourly detail trace as CSV to any writer.
///
/// One row per hour with the state of charge, energy flows, money and the
/// running savings total. Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(detail: &HourlyDetail, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HOURLY_HEADER.split(',').map(str::trim))?;

    for (r, cumulative) in detail.hours.iter().zip(&detail.cumulative_savings) {
        wtr.write_record(&[
            r.hour.to_string(),
            r.hour_of_day.to_string(),
            format!("{:.4}", r.soc_kwh),
            format!("{:.4}", r.solar_charged_kwh),
            format!("{:.4}", r.grid_charged_kwh),
            format!("{:.4}", r.discharged_kwh),
            format!("{:.6}", r.gross_savings),
            format!("{:.6}", r.charge_cost),
            format!("{:.6}", r.net_balance),
            format!("{cumulative:.6}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the monthly table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_summary_csv(summaries: &[MonthlySummary], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_summary_csv(summaries, io::BufWriter::new(file))
}

/// Writes the monthly table as CSV to any writer, in input order.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summary_csv(summaries: &[MonthlySummary], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SUMMARY_HEADER.split(',').map(str::trim))?;

    for s in summaries {
        wtr.write_record(&[
            s.label.clone(),
            format!("{:.1}", s.consumption_kwh),
            format!("{:.1}", s.surplus_kwh),
            format!("{:.2}", s.savings),
            format!("{:.2}", s.kpi.solar_charged_kwh),
            format!("{:.2}", s.kpi.grid_charged_kwh),
            format!("{:.2}", s.kpi.discharged_kwh),
            format!("{:.3}", s.kpi.equivalent_full_cycles),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
