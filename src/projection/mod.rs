//! Projection engine: revenue and cost models, yearly cash flows and valuation

mod engine;
mod cashflows;
mod revenue;
mod costs;
pub mod irr;
pub mod valuation;

pub use engine::ProjectionEngine;
pub use cashflows::{Payback, ProjectionResult, ProjectionSummary, YearlyCashFlow};
pub use revenue::RevenueBreakdown;
pub use costs::{annual_depreciation, CostBreakdown};
pub use irr::{calculate_irr, Bisection, IrrSolver, NewtonRaphson};
pub use valuation::{cumulative, npv, payback_period};
