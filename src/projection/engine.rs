//! Core projection engine for yearly DCF projections

use super::cashflows::{ProjectionResult, YearlyCashFlow};
use super::costs::CostBreakdown;
use super::irr::{IrrSolver, NewtonRaphson};
use super::revenue::RevenueBreakdown;
use super::valuation::{npv, payback_period};
use crate::assumptions::ProjectParameters;

/// Main projection engine
///
/// Holds one immutable parameter set; every call to [`project`](Self::project)
/// is a pure evaluation, so engines for different scenarios can coexist.
pub struct ProjectionEngine<S: IrrSolver = NewtonRaphson> {
    params: ProjectParameters,
    solver: S,
}

impl ProjectionEngine<NewtonRaphson> {
    /// Create a new projection engine using the default IRR solver
    pub fn new(params: ProjectParameters) -> Self {
        Self::with_solver(params, NewtonRaphson::default())
    }
}

impl<S: IrrSolver> ProjectionEngine<S> {
    /// Create an engine with a specific IRR solver
    pub fn with_solver(params: ProjectParameters, solver: S) -> Self {
        Self { params, solver }
    }

    pub fn parameters(&self) -> &ProjectParameters {
        &self.params
    }

    /// Run the full projection: revenue, costs, cash flows and valuation
    pub fn project(&self) -> ProjectionResult {
        let params = &self.params;
        let revenue = RevenueBreakdown::from_parameters(params);
        let costs = CostBreakdown::from_parameters(params);

        let cashflows = self.project_cashflows(&revenue, &costs);
        let net: Vec<f64> = cashflows.iter().map(|r| r.net_cash_flow).collect();
        let cumulative: Vec<f64> = cashflows.iter().map(|r| r.cumulative_cash_flow).collect();

        let npv = npv(&net, params.discount_rate);
        let irr = self.solver.solve(&net);
        if irr.is_none() {
            log::warn!("IRR undefined over {} years", params.analysis_period);
        }
        let payback = payback_period(&cumulative);

        let year1_profit_pre_depreciation = revenue.total_revenue - costs.total_cash_cost();
        let year1_profit_post_depreciation =
            year1_profit_pre_depreciation - costs.annual_depreciation;

        log::debug!(
            "Projected {} years at {:.2} sessions/charger: NPV={:.2} IRR={:?} payback={}",
            params.analysis_period,
            revenue.sessions_per_charger,
            npv,
            irr,
            payback
        );

        ProjectionResult {
            initial_investment: params.initial_investment(),
            subsidy_amount: params.subsidy_amount,
            effective_investment: params.effective_investment(),
            analysis_period: params.analysis_period,
            discount_rate: params.discount_rate,
            revenue,
            costs,
            cashflows,
            npv,
            irr,
            payback,
            year1_profit_pre_depreciation,
            year1_profit_post_depreciation,
        }
    }

    /// Year 0 carries the net investment; years 1..=N escalate the year-1 base
    /// values, with year 1 itself unescalated. Depreciation never enters the
    /// cash flow.
    fn project_cashflows(
        &self,
        revenue: &RevenueBreakdown,
        costs: &CostBreakdown,
    ) -> Vec<YearlyCashFlow> {
        let params = &self.params;
        let mut rows = Vec::with_capacity(params.analysis_period as usize + 1);
        rows.push(YearlyCashFlow::investment(params.effective_investment()));

        let mut cumulative = rows[0].cumulative_cash_flow;
        for year in 1..=params.analysis_period {
            let exponent = (year - 1) as i32;
            let growth = (1.0 + params.revenue_growth_rate).powi(exponent);
            let inflation = (1.0 + params.opex_inflation_rate).powi(exponent);

            let row = YearlyCashFlow::operating(
                year,
                revenue.total_revenue * growth,
                costs.operational_cost * inflation,
                costs.annual_maintenance * inflation,
                cumulative,
            );
            cumulative = row.cumulative_cash_flow;
            rows.push(row);
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::SessionVolume;
    use crate::projection::irr::Bisection;
    use crate::projection::Payback;
    use approx::assert_relative_eq;

    fn project(params: ProjectParameters) -> ProjectionResult {
        ProjectionEngine::new(params).project()
    }

    #[test]
    fn test_business_case_headline_figures() {
        let result = project(ProjectParameters::business_case());

        assert_relative_eq!(result.effective_investment, 2_250_000.0);
        assert_relative_eq!(result.costs.annual_depreciation, 200_000.0);
        assert_relative_eq!(result.revenue.total_daily_people, 100.0);
        assert_relative_eq!(result.revenue.lounge_daily_visitors, 55.0);
        assert_relative_eq!(result.revenue.lounge_revenue, 200_750.0);
        assert_relative_eq!(result.year1_profit_pre_depreciation, 326_080.0, max_relative = 1e-12);
        assert_relative_eq!(result.year1_profit_post_depreciation, 126_080.0, max_relative = 1e-12);
    }

    #[test]
    fn test_series_length_and_year_zero() {
        let params = ProjectParameters::business_case();
        let result = project(params.clone());

        assert_eq!(result.cashflows.len(), params.analysis_period as usize + 1);
        assert_relative_eq!(result.cashflows[0].net_cash_flow, -params.effective_investment());
        assert!(result.cashflows[0].net_cash_flow < 0.0);
        for (i, row) in result.cashflows.iter().enumerate() {
            assert_eq!(row.year as usize, i);
        }
    }

    #[test]
    fn test_year_one_is_unescalated() {
        let result = project(ProjectParameters::business_case());
        let year1 = &result.cashflows[1];

        assert_relative_eq!(year1.revenue, result.revenue.total_revenue);
        assert_relative_eq!(year1.operating_cost, result.costs.operational_cost);
        assert_relative_eq!(year1.maintenance, result.costs.annual_maintenance);
        assert_relative_eq!(
            year1.net_cash_flow,
            result.year1_profit_pre_depreciation,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_geometric_escalation() {
        let params = ProjectParameters::business_case();
        let result = project(params.clone());
        let year1 = result.cashflows[1];
        let year4 = result.cashflows[4];

        assert_relative_eq!(year4.revenue, year1.revenue * 1.03_f64.powi(3), max_relative = 1e-12);
        let inflation = 1.02_f64.powi(3);
        assert_relative_eq!(
            year4.operating_cost,
            year1.operating_cost * inflation,
            max_relative = 1e-12
        );
        assert_relative_eq!(year4.maintenance, year1.maintenance * inflation, max_relative = 1e-12);
    }

    #[test]
    fn test_npv_matches_returned_series() {
        for params in [ProjectParameters::business_case(), ProjectParameters::long_term_case()] {
            let result = project(params.clone());
            let recomputed: f64 = result
                .cashflows
                .iter()
                .map(|r| r.net_cash_flow / (1.0 + params.discount_rate).powi(r.year as i32))
                .sum();
            assert_relative_eq!(result.npv, recomputed, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_irr_zeroes_npv() {
        for params in [ProjectParameters::business_case(), ProjectParameters::long_term_case()] {
            let result = project(params);
            let irr = result.irr.expect("sign change present");
            let flows = result.net_cash_flows();
            let scale: f64 = flows.iter().map(|f| f.abs()).sum();
            assert!(npv(&flows, irr).abs() <= 1e-6 * scale);
        }
    }

    #[test]
    fn test_business_case_pays_back_within_horizon() {
        let result = project(ProjectParameters::business_case());
        let years = result.payback.years().expect("payback reached");
        assert!(years > 6.0 && years < 7.0, "payback {}", years);
        // IRR above the 10% hurdle goes with a positive NPV
        assert!(result.npv > 0.0);
        assert!(result.irr.unwrap() > 0.10);
    }

    #[test]
    fn test_long_term_case_flat_flows() {
        let result = project(ProjectParameters::long_term_case());
        let year1 = result.cashflows[1].net_cash_flow;
        for row in &result.cashflows[1..] {
            assert_relative_eq!(row.net_cash_flow, year1);
            assert_relative_eq!(row.maintenance, 0.0);
        }
        // 854,100 revenue less 279,750 opex
        assert_relative_eq!(year1, 574_350.0, max_relative = 1e-12);
        assert_relative_eq!(result.costs.annual_depreciation, 1_500_000.0 / 9.0);
    }

    #[test]
    fn test_payback_not_reached() {
        let params = ProjectParameters::business_case()
            .with_sessions(SessionVolume::PerCharger { sessions_per_day: 1.0 });
        let result = project(params);

        assert_eq!(result.payback, Payback::NotReached);
        assert!(result.npv < 0.0);
    }

    #[test]
    fn test_irr_undefined_when_all_flows_negative() {
        let mut params = ProjectParameters::business_case();
        params.sessions = SessionVolume::PerCharger { sessions_per_day: 0.0 };
        params.local_visitors_per_day = 0.0;
        let result = project(params);

        assert!(result.net_cash_flows().iter().all(|&cf| cf < 0.0));
        assert_eq!(result.irr, None);
        assert_eq!(result.payback, Payback::NotReached);
    }

    #[test]
    fn test_payback_monotonic_in_revenue() {
        let mut last = f64::INFINITY;
        for price in [8.0, 10.0, 12.0, 14.0, 16.0] {
            let mut params = ProjectParameters::business_case();
            params.revenue_per_session = price;
            let payback = project(params).payback.years().unwrap_or(f64::INFINITY);
            assert!(payback <= last, "payback rose to {} at ${}/session", payback, price);
            last = payback;
        }
    }

    #[test]
    fn test_zero_period_fully_subsidised() {
        let mut params = ProjectParameters::business_case();
        params.analysis_period = 0;
        params.subsidy_amount = params.initial_investment();
        let result = project(params);

        assert_eq!(result.cashflows.len(), 1);
        assert_eq!(result.payback, Payback::Year(0.0));
        assert_eq!(result.irr, None);
    }

    #[test]
    fn test_custom_solver() {
        let params = ProjectParameters::business_case();
        let newton = ProjectionEngine::new(params.clone()).project();
        let bisect = ProjectionEngine::with_solver(params, Bisection::default()).project();
        assert_relative_eq!(newton.irr.unwrap(), bisect.irr.unwrap(), epsilon = 1e-8);
    }

    #[test]
    fn test_repeat_runs_identical() {
        let engine = ProjectionEngine::new(ProjectParameters::business_case());
        let a = engine.project();
        let b = engine.project();
        assert_eq!(a.net_cash_flows(), b.net_cash_flows());
        assert_eq!(a.npv, b.npv);
    }
}
