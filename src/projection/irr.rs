//! Internal Rate of Return (IRR) calculation
//!
//! Solvers work on yearly cash flows (year 0 first) and return the annual rate
//! at which NPV is zero. Callers depend only on [`IrrSolver`], so the numeric
//! method can be swapped without touching the projection engine.

use super::valuation::{npv, npv_and_derivative};

/// Lowest rate searched (-99%)
const MIN_RATE: f64 = -0.99;

/// Highest rate searched (1000%)
const MAX_RATE: f64 = 10.0;

/// Accepted residual NPV relative to the sum of absolute cash flows
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Root finder for `sum(cf_t / (1 + r)^t) = 0`
pub trait IrrSolver {
    /// Annual IRR as a decimal, or None if no root is found
    fn solve(&self, cashflows: &[f64]) -> Option<f64>;
}

/// Newton-Raphson from an initial guess, falling back to bisection when the
/// derivative vanishes or the iteration budget runs out
#[derive(Debug, Clone, Copy)]
pub struct NewtonRaphson {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            tolerance: 1e-12,
            max_iterations: 100,
        }
    }
}

impl IrrSolver for NewtonRaphson {
    fn solve(&self, cashflows: &[f64]) -> Option<f64> {
        if !has_sign_change(cashflows) {
            return None;
        }

        let mut rate = self.initial_guess;

        for _ in 0..self.max_iterations {
            let (value, derivative) = npv_and_derivative(cashflows, rate);

            if derivative.abs() < 1e-20 {
                log::debug!("IRR derivative vanished at rate {}, switching to bisection", rate);
                break;
            }

            // Bound the rate to the searched domain
            let next = (rate - value / derivative).clamp(MIN_RATE, MAX_RATE);

            if (next - rate).abs() < self.tolerance {
                if is_root(cashflows, next) {
                    return Some(next);
                }
                // Stuck on a bound without reaching a root
                break;
            }

            rate = next;
        }

        Bisection::default().solve(cashflows)
    }
}

/// Bisection over a fixed rate bracket; requires NPV to change sign across it
#[derive(Debug, Clone, Copy)]
pub struct Bisection {
    pub low: f64,
    pub high: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for Bisection {
    fn default() -> Self {
        Self {
            low: MIN_RATE,
            high: MAX_RATE,
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl IrrSolver for Bisection {
    fn solve(&self, cashflows: &[f64]) -> Option<f64> {
        if !has_sign_change(cashflows) {
            return None;
        }

        let mut low = self.low;
        let mut high = self.high;
        let mut npv_low = npv(cashflows, low);
        let npv_high = npv(cashflows, high);

        // No root bracketed in this interval
        if npv_low * npv_high > 0.0 {
            return None;
        }

        for _ in 0..self.max_iterations {
            let mid = (low + high) / 2.0;
            let npv_mid = npv(cashflows, mid);

            if (high - low) / 2.0 < self.tolerance || npv_mid == 0.0 {
                return is_root(cashflows, mid).then_some(mid);
            }

            if npv_mid * npv_low < 0.0 {
                high = mid;
            } else {
                low = mid;
                npv_low = npv_mid;
            }
        }

        let mid = (low + high) / 2.0;
        is_root(cashflows, mid).then_some(mid)
    }
}

/// IRR of yearly cash flows with the default solver
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    let irr = NewtonRaphson::default().solve(cashflows);
    if irr.is_none() {
        log::warn!("IRR undefined for {} cash flows", cashflows.len());
    }
    irr
}

/// True if the series has both inflows and outflows
fn has_sign_change(cashflows: &[f64]) -> bool {
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    has_positive && has_negative
}

fn is_root(cashflows: &[f64], rate: f64) -> bool {
    let scale: f64 = cashflows.iter().map(|cf| cf.abs()).sum();
    npv(cashflows, rate).abs() <= RESIDUAL_TOLERANCE * scale.max(1.0)
}
