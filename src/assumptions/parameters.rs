//! Project parameter set for a charging station with an attached lounge

use serde::{Deserialize, Serialize};

/// Days per year used to annualise daily revenue and cost
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Maximum sessions per charger per day at 100% utilization
/// (24 hours of 30-minute sessions)
pub const MAX_DAILY_SESSIONS_PER_CHARGER: f64 = 48.0;

/// How daily charging volume is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionVolume {
    /// Sessions per day per charger given directly
    PerCharger { sessions_per_day: f64 },

    /// Sessions derived from a utilization percentage of a fixed daily capacity
    Utilization {
        /// Utilization in percent (25.0 = 25%)
        percent: f64,
        /// Sessions per charger per day at 100% utilization
        max_sessions_per_day: f64,
    },
}

impl SessionVolume {
    /// Utilization against the default 48 sessions/day capacity
    pub fn utilization(percent: f64) -> Self {
        SessionVolume::Utilization {
            percent,
            max_sessions_per_day: MAX_DAILY_SESSIONS_PER_CHARGER,
        }
    }

    /// Resolve to sessions per day per charger
    pub fn sessions_per_charger(&self) -> f64 {
        match *self {
            SessionVolume::PerCharger { sessions_per_day } => sessions_per_day,
            SessionVolume::Utilization { percent, max_sessions_per_day } => {
                percent / 100.0 * max_sessions_per_day
            }
        }
    }
}

/// Immutable input record for one projection run.
///
/// All money amounts are in dollars, rates are decimals (0.10 = 10%).
/// Values are not range-checked: callers supply non-negative amounts and a
/// non-zero analysis period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParameters {
    // Upfront capital
    pub land_cost: f64,
    pub chargers_cost: f64,
    pub construction_cost: f64,
    pub subsidy_amount: f64,

    // Horizon and rates
    pub analysis_period: u32,
    pub discount_rate: f64,
    pub revenue_growth_rate: f64,
    pub opex_inflation_rate: f64,

    // Charging operations
    pub revenue_per_session: f64,
    pub sessions: SessionVolume,
    pub num_chargers: u32,

    // Lounge
    pub lounge_visit_rate: f64,
    pub lounge_spend_per_visitor: f64,
    pub local_visitors_per_day: f64,

    // Operating costs
    pub electricity_cost_per_kwh: f64,
    pub kwh_per_session: f64,
    pub staffing_cost: f64,
    /// Residual operating expense, taken as given
    pub miscellaneous_cost: f64,
    pub maintenance_per_charger: f64,
}

impl ProjectParameters {
    /// Base business case: 10 DCFC chargers, lounge with walk-in traffic,
    /// 10-year horizon with revenue growth and cost inflation
    pub fn business_case() -> Self {
        Self {
            land_cost: 500_000.0,
            chargers_cost: 1_000_000.0,
            construction_cost: 1_000_000.0,
            subsidy_amount: 250_000.0,
            analysis_period: 10,
            discount_rate: 0.10,
            revenue_growth_rate: 0.03,
            opex_inflation_rate: 0.02,
            revenue_per_session: 10.0,
            sessions: SessionVolume::PerCharger { sessions_per_day: 10.0 },
            num_chargers: 10,
            lounge_visit_rate: 0.4,
            lounge_spend_per_visitor: 10.0,
            local_visitors_per_day: 15.0,
            electricity_cost_per_kwh: 0.12,
            kwh_per_session: 20.0,
            staffing_cost: 100_000.0,
            miscellaneous_cost: 22_070.0,
            maintenance_per_charger: 3_000.0,
        }
    }

    /// Long-term capital return case: cheaper build-out, busier chargers,
    /// flat (unescalated) cash flows over 9 years and no maintenance line
    pub fn long_term_case() -> Self {
        Self {
            construction_cost: 500_000.0,
            analysis_period: 9,
            revenue_growth_rate: 0.0,
            opex_inflation_rate: 0.0,
            sessions: SessionVolume::PerCharger { sessions_per_day: 18.0 },
            lounge_visit_rate: 0.30,
            local_visitors_per_day: 0.0,
            maintenance_per_charger: 0.0,
            ..Self::business_case()
        }
    }

    /// Copy of these parameters with a different session volume
    pub fn with_sessions(&self, sessions: SessionVolume) -> Self {
        Self {
            sessions,
            ..self.clone()
        }
    }

    /// Gross upfront investment (land + chargers + construction)
    pub fn initial_investment(&self) -> f64 {
        self.land_cost + self.chargers_cost + self.construction_cost
    }

    /// Depreciable capital; land is excluded
    pub fn depreciable_capex(&self) -> f64 {
        self.chargers_cost + self.construction_cost
    }

    /// Investment net of subsidy
    pub fn effective_investment(&self) -> f64 {
        self.initial_investment() - self.subsidy_amount
    }

    /// Sessions per day per charger after resolving the volume mode
    pub fn sessions_per_charger(&self) -> f64 {
        self.sessions.sessions_per_charger()
    }

    /// Total charging sessions per day across the site
    pub fn total_daily_sessions(&self) -> f64 {
        self.sessions_per_charger() * self.num_chargers as f64
    }
}

impl Default for ProjectParameters {
    fn default() -> Self {
        Self::business_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_business_case_investment() {
        let params = ProjectParameters::business_case();
        assert_relative_eq!(params.initial_investment(), 2_500_000.0);
        assert_relative_eq!(params.depreciable_capex(), 2_000_000.0);
        assert_relative_eq!(params.effective_investment(), 2_250_000.0);
        assert_relative_eq!(params.total_daily_sessions(), 100.0);
    }

    #[test]
    fn test_long_term_case_overrides() {
        let params = ProjectParameters::long_term_case();
        assert_eq!(params.analysis_period, 9);
        assert_relative_eq!(params.initial_investment(), 2_000_000.0);
        assert_relative_eq!(params.total_daily_sessions(), 180.0);
        // Unchanged fields inherit from the business case
        assert_relative_eq!(params.miscellaneous_cost, 22_070.0);
    }

    #[test]
    fn test_utilization_sessions() {
        let volume = SessionVolume::utilization(25.0);
        assert_relative_eq!(volume.sessions_per_charger(), 12.0);

        let custom = SessionVolume::Utilization { percent: 50.0, max_sessions_per_day: 20.0 };
        assert_relative_eq!(custom.sessions_per_charger(), 10.0);
    }

    #[test]
    fn test_with_sessions_keeps_costs() {
        let base = ProjectParameters::business_case();
        let swept = base.with_sessions(SessionVolume::utilization(30.0));
        assert_relative_eq!(swept.sessions_per_charger(), 14.4, max_relative = 1e-12);
        assert_relative_eq!(swept.staffing_cost, base.staffing_cost);
        assert_eq!(swept.num_chargers, base.num_chargers);
    }
}
