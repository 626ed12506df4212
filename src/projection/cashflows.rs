//! Cash-flow output structures for projections

use super::costs::CostBreakdown;
use super::revenue::RevenueBreakdown;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single row of projection output for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyCashFlow {
    /// 0 = investment year
    pub year: u32,

    // Escalated operating amounts (zero in year 0)
    pub revenue: f64,
    pub operating_cost: f64,
    pub maintenance: f64,

    pub net_cash_flow: f64,
    pub cumulative_cash_flow: f64,
}

impl YearlyCashFlow {
    /// Year-0 row holding the net investment outflow
    pub fn investment(net_investment: f64) -> Self {
        Self {
            year: 0,
            revenue: 0.0,
            operating_cost: 0.0,
            maintenance: 0.0,
            net_cash_flow: -net_investment,
            cumulative_cash_flow: -net_investment,
        }
    }

    /// Operating-year row; cumulative flow is carried from the prior row
    pub fn operating(
        year: u32,
        revenue: f64,
        operating_cost: f64,
        maintenance: f64,
        prior_cumulative: f64,
    ) -> Self {
        let net_cash_flow = revenue - operating_cost - maintenance;
        Self {
            year,
            revenue,
            operating_cost,
            maintenance,
            net_cash_flow,
            cumulative_cash_flow: prior_cumulative + net_cash_flow,
        }
    }

    pub fn is_investment_year(&self) -> bool {
        self.year == 0
    }
}

/// When cumulative cash flow first turns non-negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "years", rename_all = "snake_case")]
pub enum Payback {
    /// Fractional years from the start of the project
    Year(f64),
    /// Cumulative cash flow stays negative over the whole horizon
    NotReached,
}

impl Payback {
    pub fn years(&self) -> Option<f64> {
        match *self {
            Payback::Year(y) => Some(y),
            Payback::NotReached => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Payback::Year(_))
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Year(y) => write!(f, "{:.2} years", y),
            Payback::NotReached => write!(f, "not reached within the analysis period"),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub initial_investment: f64,
    pub subsidy_amount: f64,
    pub effective_investment: f64,
    pub analysis_period: u32,
    pub discount_rate: f64,

    /// Year-1 (unescalated) revenue
    pub revenue: RevenueBreakdown,

    /// Year-1 (unescalated) costs
    pub costs: CostBreakdown,

    /// Yearly rows for years 0..=analysis_period
    pub cashflows: Vec<YearlyCashFlow>,

    pub npv: f64,

    /// None when no rate zeroes the NPV
    pub irr: Option<f64>,

    pub payback: Payback,

    pub year1_profit_pre_depreciation: f64,
    pub year1_profit_post_depreciation: f64,
}

impl ProjectionResult {
    /// Net cash flow per year, year 0 first
    pub fn net_cash_flows(&self) -> Vec<f64> {
        self.cashflows.iter().map(|r| r.net_cash_flow).collect()
    }

    /// (year, cumulative cash flow) pairs for plotting
    pub fn cumulative_series(&self) -> Vec<(u32, f64)> {
        self.cashflows
            .iter()
            .map(|r| (r.year, r.cumulative_cash_flow))
            .collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let operating = self.cashflows.iter().filter(|r| !r.is_investment_year());

        let mut total_revenue = 0.0;
        let mut total_operating_cost = 0.0;
        let mut total_maintenance = 0.0;
        for row in operating {
            total_revenue += row.revenue;
            total_operating_cost += row.operating_cost;
            total_maintenance += row.maintenance;
        }

        let final_cumulative = self
            .cashflows
            .last()
            .map(|r| r.cumulative_cash_flow)
            .unwrap_or(0.0);

        ProjectionSummary {
            total_years: self.analysis_period,
            total_revenue,
            total_operating_cost,
            total_maintenance,
            final_cumulative_cash_flow: final_cumulative,
            npv: self.npv,
            irr: self.irr,
            payback_years: self.payback.years(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_revenue: f64,
    pub total_operating_cost: f64,
    pub total_maintenance: f64,
    pub final_cumulative_cash_flow: f64,
    pub npv: f64,
    pub irr: Option<f64>,
    pub payback_years: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_investment_row() {
        let row = YearlyCashFlow::investment(2_250_000.0);
        assert!(row.is_investment_year());
        assert_relative_eq!(row.net_cash_flow, -2_250_000.0);
        assert_relative_eq!(row.cumulative_cash_flow, -2_250_000.0);
        assert_relative_eq!(row.revenue, 0.0);
    }

    #[test]
    fn test_operating_row_accumulates() {
        let row = YearlyCashFlow::operating(1, 500.0, 200.0, 50.0, -1_000.0);
        assert_relative_eq!(row.net_cash_flow, 250.0);
        assert_relative_eq!(row.cumulative_cash_flow, -750.0);
    }

    #[test]
    fn test_payback_display() {
        assert_eq!(Payback::Year(6.456).to_string(), "6.46 years");
        assert_eq!(Payback::NotReached.years(), None);
        assert!(!Payback::NotReached.is_reached());
    }

    #[test]
    fn test_payback_serializes_with_status() {
        let json = serde_json::to_string(&Payback::Year(2.5)).unwrap();
        assert_eq!(json, r#"{"status":"year","years":2.5}"#);
        let json = serde_json::to_string(&Payback::NotReached).unwrap();
        assert_eq!(json, r#"{"status":"not_reached"}"#);
    }
}
