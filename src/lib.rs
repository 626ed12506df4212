//! Charging Station DCF - discounted cash-flow projections for an EV charging
//! station with an attached lounge
//!
//! This library provides:
//! - Revenue and cost models for charging sessions and lounge visitors
//! - Yearly cash-flow projection with revenue growth and cost inflation
//! - NPV, IRR and payback valuation
//! - Utilization sensitivity sweeps
//! - Availability logging and observed-utilization statistics

pub mod assumptions;
pub mod availability;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{ProjectParameters, SessionVolume};
pub use projection::{Payback, ProjectionEngine, ProjectionResult, YearlyCashFlow};
pub use scenario::{ScenarioRunner, SensitivityPoint, SensitivitySweep, UtilizationRange};
