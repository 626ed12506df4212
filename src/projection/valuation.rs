//! Discounting and payback over yearly cash flows

use super::cashflows::Payback;

/// Net present value of `cashflows[t]` discounted at `(1 + rate)^t`, t = 0..N.
/// The year-0 flow is undiscounted.
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// NPV and its derivative with respect to rate
pub(crate) fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            derivative -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (value, derivative)
}

/// Running total of the cash flows
pub fn cumulative(cashflows: &[f64]) -> Vec<f64> {
    cashflows
        .iter()
        .scan(0.0, |total, &cf| {
            *total += cf;
            Some(*total)
        })
        .collect()
}

/// First point where the cumulative cash flow becomes non-negative,
/// linearly interpolated between the bracketing years
pub fn payback_period(cumulative: &[f64]) -> Payback {
    for (i, &cum) in cumulative.iter().enumerate() {
        if cum >= 0.0 {
            if i == 0 {
                return Payback::Year(0.0);
            }
            let prev = cumulative[i - 1];
            let fraction = (0.0 - prev) / (cum - prev);
            return Payback::Year((i - 1) as f64 + fraction);
        }
    }

    Payback::NotReached
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_single_period() {
        // -100 today, 110 in a year at 10% is break-even
        assert_relative_eq!(npv(&[-100.0, 110.0], 0.10), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_npv_zero_rate_is_sum() {
        assert_relative_eq!(npv(&[-300.0, 100.0, 100.0, 150.0], 0.0), 50.0);
    }

    #[test]
    fn test_npv_derivative_matches_finite_difference() {
        let flows = [-1000.0, 300.0, 400.0, 500.0];
        let (value, derivative) = npv_and_derivative(&flows, 0.08);
        let h = 1e-6;
        let numeric = (npv(&flows, 0.08 + h) - npv(&flows, 0.08 - h)) / (2.0 * h);

        assert_relative_eq!(value, npv(&flows, 0.08));
        assert_relative_eq!(derivative, numeric, max_relative = 1e-6);
    }

    #[test]
    fn test_cumulative() {
        let cum = cumulative(&[-100.0, 30.0, 30.0, 50.0]);
        assert_eq!(cum, vec![-100.0, -70.0, -40.0, 10.0]);
    }

    #[test]
    fn test_payback_interpolates() {
        // Crosses zero 80% of the way through year 3
        let payback = payback_period(&[-100.0, -70.0, -40.0, 10.0]);
        assert_relative_eq!(payback.years().unwrap(), 2.8);
    }

    #[test]
    fn test_payback_exact_year() {
        let payback = payback_period(&[-100.0, -50.0, 0.0]);
        assert_relative_eq!(payback.years().unwrap(), 2.0);
    }

    #[test]
    fn test_payback_at_year_zero() {
        assert_eq!(payback_period(&[0.0, 10.0]), Payback::Year(0.0));
        assert_eq!(payback_period(&[25.0]), Payback::Year(0.0));
    }

    #[test]
    fn test_payback_not_reached() {
        assert_eq!(payback_period(&[-100.0, -80.0, -60.0]), Payback::NotReached);
        assert_eq!(payback_period(&[]), Payback::NotReached);
    }
}
