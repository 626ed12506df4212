//! Charging Station DCF CLI
//!
//! Runs the business-case projection and prints the valuation report,
//! cash-flow table and utilization sensitivity table

use anyhow::{Context, Result};
use charging_station_dcf::{
    assumptions::{load_parameters, ProjectParameters, MAX_DAILY_SESSIONS_PER_CHARGER},
    report::{self, ScenarioReport},
    ScenarioRunner, UtilizationRange,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Case {
    /// 10-year case with growth, inflation and lounge walk-ins
    Base,
    /// 9-year flat case with a cheaper build-out
    LongTerm,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "NPV, IRR and payback projection for an EV charging station with lounge"
)]
struct Cli {
    /// Preset case to project
    #[arg(long, value_enum, default_value_t = Case::Base)]
    case: Case,

    /// JSON parameter file, overrides --case
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the discount rate (decimal, e.g. 0.08)
    #[arg(long)]
    discount_rate: Option<f64>,

    /// First utilization percentage of the sensitivity sweep
    #[arg(long, default_value_t = 15.0)]
    sweep_from: f64,

    /// Last utilization percentage of the sensitivity sweep (inclusive)
    #[arg(long, default_value_t = 30.0)]
    sweep_to: f64,

    /// Utilization step in percent
    #[arg(long, default_value_t = 1.0)]
    sweep_step: f64,

    /// Sessions per charger per day at 100% utilization
    #[arg(long, default_value_t = MAX_DAILY_SESSIONS_PER_CHARGER)]
    max_sessions: f64,

    /// Skip the sensitivity sweep
    #[arg(long)]
    no_sweep: bool,

    /// Print a JSON document instead of the text report
    #[arg(long)]
    json: bool,

    /// Directory for cumulative_cash_flow.csv and sensitivity.csv
    #[arg(long)]
    series_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let mut params = match &cli.config {
        Some(path) => load_parameters(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => match cli.case {
            Case::Base => ProjectParameters::business_case(),
            Case::LongTerm => ProjectParameters::long_term_case(),
        },
    };
    if let Some(rate) = cli.discount_rate {
        params.discount_rate = rate;
    }

    let runner = ScenarioRunner::with_parameters(params);
    let result = runner.run();

    let sensitivity = if cli.no_sweep {
        None
    } else {
        let range = UtilizationRange {
            max_sessions_per_day: cli.max_sessions,
            ..UtilizationRange::new(cli.sweep_from, cli.sweep_to, cli.sweep_step)
        };
        Some(runner.sensitivity_sweep(&range))
    };

    let scenario = ScenarioReport {
        parameters: runner.parameters().clone(),
        result,
        sensitivity,
    };

    if let Some(dir) = &cli.series_dir {
        report::export_series(dir, &scenario)
            .with_context(|| format!("writing series to {}", dir.display()))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&scenario)?);
        return Ok(());
    }

    println!("Charging Station DCF v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");
    print!("{}", report::render_report(&scenario.parameters, &scenario.result));

    println!("\nCash Flow Projection:");
    print!("{}", report::render_cashflow_table(&scenario.result));

    if let Some(sweep) = &scenario.sensitivity {
        println!("\nSensitivity Analysis (Utilization vs. NPV & Profit):");
        print!("{}", report::render_sensitivity(sweep, scenario.result.analysis_period));
        match sweep.break_even_utilization() {
            Some(pct) => println!("\nNPV turns non-negative at {:.0}% utilization", pct),
            None => println!("\nNPV stays negative across the swept utilization range"),
        }
    }

    if let Some(dir) = &cli.series_dir {
        println!("\nSeries written to: {}", dir.display());
    }

    log::info!("Completed in {:?}", start.elapsed());
    Ok(())
}
