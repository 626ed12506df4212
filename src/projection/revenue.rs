//! Year-1 revenue model: charging sessions plus lounge spend

use crate::assumptions::{ProjectParameters, DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// Base-year revenue figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub sessions_per_charger: f64,

    /// Charging sessions per day across all chargers (each session is one visitor)
    pub total_daily_people: f64,
    pub charger_revenue: f64,

    pub lounge_daily_visitors: f64,
    pub lounge_daily_revenue: f64,
    pub lounge_revenue: f64,

    pub total_revenue: f64,
}

impl RevenueBreakdown {
    pub fn from_parameters(params: &ProjectParameters) -> Self {
        let sessions_per_charger = params.sessions_per_charger();
        let total_daily_people = params.total_daily_sessions();

        let charger_revenue = sessions_per_charger
            * params.revenue_per_session
            * DAYS_PER_YEAR
            * params.num_chargers as f64;

        let lounge_daily_visitors =
            total_daily_people * params.lounge_visit_rate + params.local_visitors_per_day;
        let lounge_daily_revenue = lounge_daily_visitors * params.lounge_spend_per_visitor;
        let lounge_revenue = lounge_daily_revenue * DAYS_PER_YEAR;

        Self {
            sessions_per_charger,
            total_daily_people,
            charger_revenue,
            lounge_daily_visitors,
            lounge_daily_revenue,
            lounge_revenue,
            total_revenue: charger_revenue + lounge_revenue,
        }
    }
}
