//! Level-payment annuity formulas
//!
//! Rates are annual nominal percentages (4.5 means 4.5%) compounded monthly,
//! matching how every loan calculator takes its input.

use super::growth::periodic_rate;

/// Monthly rate from an annual percentage
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Fixed monthly payment that retires `principal` over `total_payments` months
///
/// M = P·r(1+r)ⁿ / [(1+r)ⁿ − 1], falling back to P/n when the rate is zero.
/// `total_payments` must be positive; calculators guard it through validation.
pub fn solve_for_payment(principal: f64, annual_rate_pct: f64, total_payments: u32) -> f64 {
    let r = monthly_rate(annual_rate_pct);
    let n = total_payments as f64;
    if r == 0.0 {
        return principal / n;
    }
    let factor = (1.0 + r).powf(n);
    principal * (r * factor) / (factor - 1.0)
}

/// Largest principal a fixed monthly `payment` retires over `total_payments` months
///
/// Inverse of [`solve_for_payment`].
pub fn solve_for_principal(payment: f64, annual_rate_pct: f64, total_payments: u32) -> f64 {
    let r = monthly_rate(annual_rate_pct);
    let n = total_payments as f64;
    if r == 0.0 {
        return payment * n;
    }
    let factor = (1.0 + r).powf(n);
    payment * (factor - 1.0) / (r * factor)
}

/// Contribution per compounding period needed to grow `present_value` into `target`
///
/// Solves the future-value formula for PMT. Returns 0 when the lump sum alone
/// already reaches the target, and 0 for a zero-length horizon.
pub fn solve_for_contribution(
    target: f64,
    present_value: f64,
    annual_rate_pct: f64,
    years: f64,
    compounds_per_year: u32,
) -> f64 {
    let periods = compounds_per_year as f64 * years;
    if periods <= 0.0 {
        return 0.0;
    }

    let rn = periodic_rate(annual_rate_pct, compounds_per_year);
    let required = if rn == 0.0 {
        (target - present_value) / periods
    } else {
        let factor = (1.0 + rn).powf(periods);
        (target - present_value * factor) / ((factor - 1.0) / rn)
    };

    required.max(0.0)
}

/// Total interest over a fully amortized loan
pub fn total_interest(principal: f64, payment: f64, total_payments: u32) -> f64 {
    payment * total_payments as f64 - principal
}
