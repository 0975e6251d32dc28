//! Amortized loan summaries and payment schedules

mod schedule;

pub use schedule::{
    generate_amortization, month_label, payment_date, write_schedule_csv, AmortizationRow,
};

use serde::{Deserialize, Serialize};

use crate::math::{round2, solve_for_payment, total_interest};

/// Headline figures for a fully amortized loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    /// Payment, total paid and total interest, each rounded to cents
    ///
    /// Totals are computed from the unrounded payment.
    pub fn compute(principal: f64, annual_rate_pct: f64, total_payments: u32) -> Self {
        let payment = solve_for_payment(principal, annual_rate_pct, total_payments);
        Self {
            monthly_payment: round2(payment),
            total_payment: round2(payment * total_payments as f64),
            total_interest: round2(total_interest(principal, payment, total_payments)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_loan_summary() {
        let summary = LoanSummary::compute(300_000.0, 4.5, 360);
        assert_eq!(summary.monthly_payment, 1520.06);
        assert_abs_diff_eq!(summary.total_interest, 247_220.71, epsilon = 1.0);
        assert_abs_diff_eq!(
            summary.total_payment - summary.total_interest,
            300_000.0,
            epsilon = 0.011
        );
    }
}
