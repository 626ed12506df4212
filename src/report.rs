//! Text report and plotting-series export
//!
//! The cumulative cash-flow series and the sensitivity table are written as
//! plain CSV/JSON so any charting tool can render them.

use crate::assumptions::ProjectParameters;
use crate::projection::{Payback, ProjectionResult};
use crate::scenario::SensitivitySweep;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while exporting series
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything computed for one case, as emitted by `--json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub parameters: ProjectParameters,
    pub result: ProjectionResult,
    pub sensitivity: Option<SensitivitySweep>,
}

#[derive(Serialize)]
struct CumulativeRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "NetCashFlow")]
    net_cash_flow: f64,
    #[serde(rename = "CumulativeCashFlow")]
    cumulative_cash_flow: f64,
}

#[derive(Serialize)]
struct SensitivityRow {
    #[serde(rename = "UtilizationPct")]
    utilization_pct: f64,
    #[serde(rename = "SessionsPerCharger")]
    sessions_per_charger: f64,
    #[serde(rename = "NPV")]
    npv: f64,
    #[serde(rename = "Year1Profit")]
    year1_profit: f64,
}

/// Format dollars with thousands separators and cents, e.g. `$2,250,000.00`.
/// Negative amounts keep the sign after the dollar sign (`$-1,500.00`).
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}

/// IRR as a percentage, or "undefined"
pub fn format_irr(irr: Option<f64>) -> String {
    match irr {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "undefined".to_string(),
    }
}

/// Render the headline report for one projection
pub fn render_report(params: &ProjectParameters, result: &ProjectionResult) -> String {
    let mut out = String::new();
    let revenue = &result.revenue;
    let costs = &result.costs;

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "Initial Investment (before subsidy): {}",
        format_currency(result.initial_investment)
    );
    let _ = writeln!(out, "Government Subsidy: {}", format_currency(result.subsidy_amount));
    let _ = writeln!(
        out,
        "Effective Initial Investment (after subsidy): {}",
        format_currency(result.effective_investment)
    );
    let _ = writeln!(
        out,
        "Annual Depreciation Expense: {}",
        format_currency(costs.annual_depreciation)
    );
    let _ = writeln!(out, "Total Daily People Visiting Station: {:.0}", revenue.total_daily_people);
    let _ = writeln!(
        out,
        "Lounge Daily Visitors (at {:.0}%): {:.2}",
        params.lounge_visit_rate * 100.0,
        revenue.lounge_daily_visitors
    );
    let _ = writeln!(
        out,
        "Charger Annual Revenue (Year 1): {}",
        format_currency(revenue.charger_revenue)
    );
    let _ = writeln!(
        out,
        "Lounge Annual Revenue (Year 1): {}",
        format_currency(revenue.lounge_revenue)
    );
    let _ = writeln!(
        out,
        "Annual Energy Cost (Year 1): {}",
        format_currency(costs.annual_energy_cost)
    );
    let _ = writeln!(
        out,
        "Operational Costs excluding maintenance (Year 1): {}",
        format_currency(costs.operational_cost)
    );
    let _ = writeln!(
        out,
        "Operating Costs including maintenance (Year 1): {}",
        format_currency(costs.total_cash_cost())
    );
    let _ = writeln!(
        out,
        "Annual Operating Profit (before depreciation, Year 1): {}",
        format_currency(result.year1_profit_pre_depreciation)
    );
    let _ = writeln!(
        out,
        "Annual Operating Profit (after depreciation, Year 1): {}",
        format_currency(result.year1_profit_post_depreciation)
    );
    let _ = writeln!(
        out,
        "NPV over {} years (at {:.1}% discount rate): {}",
        result.analysis_period,
        result.discount_rate * 100.0,
        format_currency(result.npv)
    );
    let _ = writeln!(out, "IRR: {}", format_irr(result.irr));
    match result.payback {
        Payback::Year(years) => {
            let _ = writeln!(out, "Payback Period: {:.2} years", years);
        }
        Payback::NotReached => {
            let _ = writeln!(out, "Payback period not reached within the analysis period.");
        }
    }

    out
}

/// Render the yearly cash-flow table
pub fn render_cashflow_table(result: &ProjectionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>16} {:>16} {:>14} {:>16} {:>18}",
        "Year", "Revenue", "OpCost", "Maintenance", "NetCashFlow", "Cumulative"
    );
    let _ = writeln!(out, "{}", "-".repeat(89));
    for row in &result.cashflows {
        let _ = writeln!(
            out,
            "{:>4} {:>16.2} {:>16.2} {:>14.2} {:>16.2} {:>18.2}",
            row.year,
            row.revenue,
            row.operating_cost,
            row.maintenance,
            row.net_cash_flow,
            row.cumulative_cash_flow
        );
    }
    out
}

/// Render the sensitivity table
pub fn render_sensitivity(sweep: &SensitivitySweep, analysis_period: u32) -> String {
    let mut out = String::new();
    let npv_header = format!("NPV in year {}", analysis_period);
    let _ = writeln!(
        out,
        "{:>11} {:>16} {:>18} {:>18}",
        "Utilization", "Sessions/Charger", npv_header, "Profit (Year 1)"
    );
    let _ = writeln!(out, "{}", "-".repeat(66));
    let decimals = sweep.utilization_decimals();
    for point in &sweep.points {
        let _ = writeln!(
            out,
            "{:>10.*}% {:>16.2} {:>18} {:>18}",
            decimals,
            point.utilization_pct,
            point.sessions_per_charger,
            format_currency(point.npv),
            format_currency(point.year1_profit)
        );
    }
    out
}

/// Write (year, net, cumulative) rows as CSV
pub fn write_cumulative_csv<W: io::Write>(
    writer: W,
    result: &ProjectionResult,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &result.cashflows {
        csv_writer.serialize(CumulativeRow {
            year: row.year,
            net_cash_flow: row.net_cash_flow,
            cumulative_cash_flow: row.cumulative_cash_flow,
        })?;
    }
    csv_writer.flush().map_err(|source| ExportError::Io {
        path: "<cumulative series>".to_string(),
        source,
    })?;
    Ok(())
}

/// Write the sensitivity table as CSV
pub fn write_sensitivity_csv<W: io::Write>(
    writer: W,
    sweep: &SensitivitySweep,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in &sweep.points {
        csv_writer.serialize(SensitivityRow {
            utilization_pct: point.utilization_pct,
            sessions_per_charger: point.sessions_per_charger,
            npv: point.npv,
            year1_profit: point.year1_profit,
        })?;
    }
    csv_writer.flush().map_err(|source| ExportError::Io {
        path: "<sensitivity table>".to_string(),
        source,
    })?;
    Ok(())
}

/// Write `cumulative_cash_flow.csv` and, when present, `sensitivity.csv` into `dir`
pub fn export_series(dir: &Path, report: &ScenarioReport) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let cumulative_path = dir.join("cumulative_cash_flow.csv");
    let file = create(&cumulative_path)?;
    write_cumulative_csv(file, &report.result)?;
    log::info!("Cumulative cash flow written to {}", cumulative_path.display());

    if let Some(sweep) = &report.sensitivity {
        let sensitivity_path = dir.join("sensitivity.csv");
        let file = create(&sensitivity_path)?;
        write_sensitivity_csv(file, sweep)?;
        log::info!("Sensitivity table written to {}", sensitivity_path.display());
    }

    Ok(())
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}
