//! Year-1 cost model and straight-line depreciation

use crate::assumptions::{ProjectParameters, DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// Base-year operating costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub energy_cost_per_session: f64,
    pub annual_energy_cost: f64,
    pub staffing_cost: f64,
    pub miscellaneous_cost: f64,

    /// Energy + staffing + miscellaneous; maintenance is tracked separately
    pub operational_cost: f64,
    pub annual_maintenance: f64,

    /// Non-cash, reported in profit only
    pub annual_depreciation: f64,
}

impl CostBreakdown {
    pub fn from_parameters(params: &ProjectParameters) -> Self {
        let energy_cost_per_session = params.kwh_per_session * params.electricity_cost_per_kwh;
        let annual_energy_cost =
            params.total_daily_sessions() * energy_cost_per_session * DAYS_PER_YEAR;

        let operational_cost =
            annual_energy_cost + params.staffing_cost + params.miscellaneous_cost;
        let annual_maintenance = params.maintenance_per_charger * params.num_chargers as f64;

        Self {
            energy_cost_per_session,
            annual_energy_cost,
            staffing_cost: params.staffing_cost,
            miscellaneous_cost: params.miscellaneous_cost,
            operational_cost,
            annual_maintenance,
            annual_depreciation: annual_depreciation(params),
        }
    }

    /// Operating cost including maintenance
    pub fn total_cash_cost(&self) -> f64 {
        self.operational_cost + self.annual_maintenance
    }
}

/// Straight-line depreciation of chargers and construction over the analysis period.
/// A zero-year period yields a non-finite value.
pub fn annual_depreciation(params: &ProjectParameters) -> f64 {
    params.depreciable_capex() / params.analysis_period as f64
}
