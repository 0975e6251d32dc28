//! Month-by-month amortization schedule for a fixed-rate loan

use std::io::Write;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{monthly_rate, round2, solve_for_payment};

/// One scheduled payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    /// 1-based payment number
    pub payment_num: u32,
    pub date: NaiveDate,
    pub principal_paid: f64,
    pub interest_paid: f64,
    /// Remaining balance after this payment
    pub balance: f64,
}

impl AmortizationRow {
    /// Month label as shown in result tables, e.g. `Feb 2025`
    pub fn date_label(&self) -> String {
        month_label(self.date)
    }
}

/// `MMM yyyy` label for a payment date
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Date of the payment `offset` months after `start`
///
/// Days past the end of a shorter month clamp to its last day
/// (Jan 31 + 1 month = Feb 28/29).
pub fn payment_date(start: NaiveDate, offset: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(offset))
        .unwrap_or(NaiveDate::MAX)
}

/// Generate the full schedule for `total_payments` monthly payments
///
/// The first payment falls one month after `start_date`. Amounts are rounded
/// to cents per row; the running balance is carried unrounded and forced to
/// exactly zero on the final row.
pub fn generate_amortization(
    principal: f64,
    annual_rate_pct: f64,
    total_payments: u32,
    start_date: NaiveDate,
) -> Vec<AmortizationRow> {
    let payment = solve_for_payment(principal, annual_rate_pct, total_payments);
    let rate = monthly_rate(annual_rate_pct);

    let mut balance = principal;
    let mut rows = Vec::with_capacity(total_payments as usize);

    for i in 1..=total_payments {
        let interest_paid = balance * rate;
        let principal_paid = payment - interest_paid;
        balance -= principal_paid;
        if i == total_payments {
            balance = 0.0;
        }

        rows.push(AmortizationRow {
            payment_num: i,
            date: payment_date(start_date, i),
            principal_paid: round2(principal_paid),
            interest_paid: round2(interest_paid),
            balance: round2(balance.max(0.0)),
        });
    }

    rows
}

/// Write a schedule as CSV with a header row
pub fn write_schedule_csv<W: Write>(rows: &[AmortizationRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn jan_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_thirty_year_schedule() {
        let rows = generate_amortization(300_000.0, 4.5, 360, jan_2025());
        assert_eq!(rows.len(), 360);

        let first = &rows[0];
        assert_eq!(first.payment_num, 1);
        assert_eq!(first.interest_paid, 1125.0);
        assert_abs_diff_eq!(first.principal_paid, 395.06, epsilon = 1e-9);

        assert_eq!(rows.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_principal_portions_sum_to_principal() {
        for (principal, rate, n) in [
            (300_000.0, 4.5, 360),
            (25_000.0, 7.9, 60),
            (1_000.0, 29.99, 12),
            (150_000.0, 0.01, 180),
        ] {
            let rows = generate_amortization(principal, rate, n, jan_2025());
            let total: f64 = rows.iter().map(|r| r.principal_paid).sum();
            // each row rounds to the nearest cent
            let tolerance = 0.005 * n as f64;
            assert!(
                (total - principal).abs() <= tolerance,
                "{} @ {}% x {}: principal sums to {}",
                principal, rate, n, total
            );
            assert_eq!(rows.last().unwrap().balance, 0.0);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let rows = generate_amortization(1_200.0, 0.0, 12, jan_2025());
        assert!(rows.iter().all(|r| r.interest_paid == 0.0 && r.principal_paid == 100.0));
        assert_eq!(rows[5].balance, 600.0);
    }

    #[test]
    fn test_payment_dates_advance_monthly() {
        let rows = generate_amortization(10_000.0, 5.0, 14, jan_2025());
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());
        assert_eq!(rows[0].date_label(), "Feb 2025");
        assert_eq!(rows[11].date_label(), "Jan 2026");
        assert_eq!(rows[13].date_label(), "Mar 2026");
    }

    #[test]
    fn test_payment_date_clamps_to_month_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(payment_date(start, 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(payment_date(start, 2), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let a = generate_amortization(87_500.0, 6.1, 120, jan_2025());
        let b = generate_amortization(87_500.0, 6.1, 120, jan_2025());
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_csv() {
        let rows = generate_amortization(1_200.0, 0.0, 2, jan_2025());
        let mut out = Vec::new();
        write_schedule_csv(&rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("paymentNum,date,principalPaid,interestPaid,balance"));
        assert_eq!(lines.next(), Some("1,2025-02-15,600.0,0.0,600.0"));
        assert_eq!(lines.next(), Some("2,2025-03-15,600.0,0.0,0.0"));
    }
}
