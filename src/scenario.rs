//! Scenario runner for comparing cases and sweeping utilization
//!
//! Holds a base parameter set, then runs independent projections for
//! alternative cases or for each point of a utilization sweep.

use crate::assumptions::{ProjectParameters, SessionVolume, MAX_DAILY_SESSIONS_PER_CHARGER};
use crate::projection::{ProjectionEngine, ProjectionResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Largest number of points a single sweep will evaluate
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Inclusive utilization range in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationRange {
    pub from_pct: f64,
    pub to_pct: f64,
    pub step_pct: f64,
    /// Sessions per charger per day at 100% utilization
    pub max_sessions_per_day: f64,
}

impl UtilizationRange {
    pub fn new(from_pct: f64, to_pct: f64, step_pct: f64) -> Self {
        Self {
            from_pct,
            to_pct,
            step_pct,
            max_sessions_per_day: MAX_DAILY_SESSIONS_PER_CHARGER,
        }
    }

    /// Utilization values in ascending order. Each value is computed from its
    /// index so repeated steps do not accumulate rounding drift.
    ///
    /// Non-finite bounds or steps, a non-positive step, an inverted range and
    /// ranges longer than [`MAX_SWEEP_POINTS`] all yield no values.
    pub fn values(&self) -> Vec<f64> {
        let (from, to, step) = (self.from_pct, self.to_pct, self.step_pct);
        if !(from.is_finite() && to.is_finite() && step.is_finite()) {
            log::warn!("Ignoring non-finite utilization range {}..={} step {}", from, to, step);
            return Vec::new();
        }
        if step <= 0.0 || to < from {
            return Vec::new();
        }

        let intervals = ((to - from) / step + 1e-9).floor();
        let count = match (intervals < MAX_SWEEP_POINTS as f64)
            .then(|| (intervals as usize).checked_add(1))
            .flatten()
        {
            Some(count) => count,
            None => {
                log::warn!(
                    "Utilization range {}..={} step {} exceeds {} points, skipping sweep",
                    from,
                    to,
                    step,
                    MAX_SWEEP_POINTS
                );
                return Vec::new();
            }
        };

        (0..count).map(|k| from + k as f64 * step).collect()
    }
}

impl Default for UtilizationRange {
    /// 15% to 30% in 1% steps
    fn default() -> Self {
        Self::new(15.0, 30.0, 1.0)
    }
}

/// One row of the sensitivity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub utilization_pct: f64,
    pub sessions_per_charger: f64,
    pub npv: f64,
    /// Year-1 operating profit after depreciation
    pub year1_profit: f64,
}

/// Sensitivity table ordered by ascending utilization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensitivitySweep {
    pub points: Vec<SensitivityPoint>,
}

impl SensitivitySweep {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Decimal places needed to print every utilization without two points
    /// sharing a label: 0 for whole-percent sweeps, 1 otherwise
    pub fn utilization_decimals(&self) -> usize {
        let fractional = self
            .points
            .iter()
            .any(|p| (p.utilization_pct - p.utilization_pct.round()).abs() > 1e-9);
        if fractional {
            1
        } else {
            0
        }
    }

    /// Lowest swept utilization with a non-negative NPV
    pub fn break_even_utilization(&self) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.npv >= 0.0)
            .map(|p| p.utilization_pct)
    }
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = runner.run();
/// let sweep = runner.sensitivity_sweep(&UtilizationRange::default());
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_params: ProjectParameters,
}

impl ScenarioRunner {
    /// Create runner for the base business case
    pub fn new() -> Self {
        Self {
            base_params: ProjectParameters::business_case(),
        }
    }

    /// Create runner with a specific parameter set
    pub fn with_parameters(params: ProjectParameters) -> Self {
        Self { base_params: params }
    }

    /// Project the base parameters
    pub fn run(&self) -> ProjectionResult {
        ProjectionEngine::new(self.base_params.clone()).project()
    }

    /// Project several independent cases, results in input order
    pub fn run_scenarios(&self, cases: &[ProjectParameters]) -> Vec<ProjectionResult> {
        cases
            .iter()
            .map(|params| ProjectionEngine::new(params.clone()).project())
            .collect()
    }

    /// Rerun the full projection at each utilization in the range.
    /// Points are independent and evaluated in parallel; output stays ascending.
    pub fn sensitivity_sweep(&self, range: &UtilizationRange) -> SensitivitySweep {
        let values = range.values();
        log::info!(
            "Sweeping utilization {}%..={}% ({} points, {} max sessions/day)",
            range.from_pct,
            range.to_pct,
            values.len(),
            range.max_sessions_per_day
        );

        let points = values
            .par_iter()
            .map(|&percent| {
                let sessions = SessionVolume::Utilization {
                    percent,
                    max_sessions_per_day: range.max_sessions_per_day,
                };
                let params = self.base_params.with_sessions(sessions);
                let result = ProjectionEngine::new(params).project();
                SensitivityPoint {
                    utilization_pct: percent,
                    sessions_per_charger: sessions.sessions_per_charger(),
                    npv: result.npv,
                    year1_profit: result.year1_profit_post_depreciation,
                }
            })
            .collect();

        SensitivitySweep { points }
    }

    /// Get reference to base parameters for inspection
    pub fn parameters(&self) -> &ProjectParameters {
        &self.base_params
    }

    /// Get mutable reference to base parameters for customization
    pub fn parameters_mut(&mut self) -> &mut ProjectParameters {
        &mut self.base_params
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
