//! Compound growth: future value, present value and CAGR

/// Rate per compounding period from an annual percentage
pub fn periodic_rate(annual_rate_pct: f64, compounds_per_year: u32) -> f64 {
    if compounds_per_year == 0 {
        return 0.0;
    }
    annual_rate_pct / 100.0 / compounds_per_year as f64
}

/// Future value of a lump sum plus a contribution made every compounding period
///
/// FV = PV·(1+r/n)^(n·t) + PMT·[((1+r/n)^(n·t) − 1) / (r/n)]
///
/// With a zero rate this is plain accumulation: PV + PMT·n·t.
pub fn future_value(
    present_value: f64,
    annual_rate_pct: f64,
    years: f64,
    compounds_per_year: u32,
    contribution_per_period: f64,
) -> f64 {
    let periods = compounds_per_year as f64 * years;
    let rn = periodic_rate(annual_rate_pct, compounds_per_year);
    if rn == 0.0 {
        return present_value + contribution_per_period * periods;
    }

    let factor = (1.0 + rn).powf(periods);
    present_value * factor + contribution_per_period * ((factor - 1.0) / rn)
}

/// Present value of `future_value` received after `years`
///
/// PV = FV / (1+r/n)^(n·t)
pub fn present_value(
    future_value: f64,
    annual_rate_pct: f64,
    years: f64,
    compounds_per_year: u32,
) -> f64 {
    let rn = periodic_rate(annual_rate_pct, compounds_per_year);
    if rn == 0.0 {
        return future_value;
    }
    let periods = compounds_per_year as f64 * years;
    future_value / (1.0 + rn).powf(periods)
}

/// Compound annual growth rate as a decimal
///
/// Returns 0 for a non-positive starting value or horizon.
pub fn cagr(start_value: f64, end_value: f64, years: f64) -> f64 {
    if start_value <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    (end_value / start_value).powf(1.0 / years) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lump_sum_growth() {
        // $10,000 at 5% compounded monthly for 10 years
        let fv = future_value(10_000.0, 5.0, 10.0, 12, 0.0);
        assert_abs_diff_eq!(fv, 16_470.09, epsilon = 0.01);
    }

    #[test]
    fn test_contributions_growth() {
        let fv = future_value(0.0, 6.0, 10.0, 12, 200.0);
        assert_abs_diff_eq!(fv, 32_775.87, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        assert_eq!(future_value(1_000.0, 0.0, 5.0, 12, 100.0), 7_000.0);
        assert_eq!(present_value(7_000.0, 0.0, 5.0, 12), 7_000.0);
    }

    #[test]
    fn test_present_value_inverts_future_value() {
        let fv = future_value(2_500.0, 7.0, 20.0, 4, 0.0);
        assert_abs_diff_eq!(present_value(fv, 7.0, 20.0, 4), 2_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cagr() {
        assert_abs_diff_eq!(cagr(100.0, 200.0, 1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cagr(1_000.0, 2_000.0, 10.0), 0.071773, epsilon = 1e-6);
        assert_eq!(cagr(0.0, 200.0, 5.0), 0.0);
        assert_eq!(cagr(100.0, 200.0, 0.0), 0.0);
    }
}
