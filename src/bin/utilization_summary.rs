//! Summarize logged charger availability and project the business case at
//! the observed utilization
//!
//! Reads a CSV with columns Timestamp, Station, Available Chargers, Total Chargers.

use anyhow::{bail, Context, Result};
use charging_station_dcf::{
    availability::{load_samples, overall_utilization, station_utilization, DEFAULT_SAMPLES_FILE},
    report::{format_currency, format_irr},
    ProjectParameters, ScenarioRunner, SessionVolume, UtilizationRange,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-station utilization from availability logs")]
struct Cli {
    /// Availability log CSV
    #[arg(long, default_value = DEFAULT_SAMPLES_FILE)]
    input: PathBuf,

    /// Also sweep NPV within this many percentage points of the observed mean
    #[arg(long)]
    sweep_band: Option<f64>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let samples = load_samples(&cli.input)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("reading samples from {}", cli.input.display()))?;
    log::info!("Loaded {} samples from {}", samples.len(), cli.input.display());

    let stations = station_utilization(&samples);
    let Some(observed) = overall_utilization(&samples) else {
        bail!("no usable samples in {}", cli.input.display());
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stations)?);
        return Ok(());
    }

    println!("{:<40} {:>16} {:>8}", "Station", "Utilization (%)", "Samples");
    println!("{}", "-".repeat(66));
    for station in &stations {
        println!(
            "{:<40} {:>16.2} {:>8}",
            station.station, station.mean_utilization_pct, station.samples
        );
    }
    println!("\nObserved mean utilization: {:.2}%", observed);

    let params =
        ProjectParameters::business_case().with_sessions(SessionVolume::utilization(observed));
    let runner = ScenarioRunner::with_parameters(params);
    let result = runner.run();

    println!(
        "\nBusiness case at observed utilization ({:.2} sessions/charger/day):",
        result.revenue.sessions_per_charger
    );
    println!("  NPV:     {}", format_currency(result.npv));
    println!("  IRR:     {}", format_irr(result.irr));
    println!("  Payback: {}", result.payback);

    if let Some(band) = cli.sweep_band {
        let from = (observed - band).max(0.0).floor();
        let to = (observed + band).min(100.0).ceil();
        let sweep = runner.sensitivity_sweep(&UtilizationRange::new(from, to, 1.0));

        let decimals = sweep.utilization_decimals();
        println!("\n{:>11} {:>18}", "Utilization", "NPV");
        for point in &sweep.points {
            println!(
                "{:>10.*}% {:>18}",
                decimals,
                point.utilization_pct,
                format_currency(point.npv)
            );
        }
    }

    Ok(())
}
