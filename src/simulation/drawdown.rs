//! Retirement drawdown: monthly withdrawals rising with inflation

use crate::math::monthly_rate;

/// One year of withdrawals, unrounded
#[derive(Debug, Clone, PartialEq)]
pub struct DrawdownYear {
    /// 1-based year index
    pub year: u32,
    pub start_balance: f64,
    pub withdrawal: f64,
    pub interest: f64,
    pub end_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawdown {
    pub years: Vec<DrawdownYear>,
    /// True when the balance ran out within the horizon
    pub depleted: bool,
    pub total_withdrawn: f64,
    pub total_interest: f64,
}

/// Withdraw `annual_withdrawal / 12` each month until the balance runs out
///
/// Each month accrues interest first, then withdraws up to the balance. The
/// withdrawal grows by `inflation_pct` after every full year. Stops after
/// `max_years` if the money has not run out.
pub fn simulate_drawdown(
    balance: f64,
    annual_withdrawal: f64,
    annual_return_pct: f64,
    inflation_pct: f64,
    max_years: u32,
) -> Drawdown {
    let rate = monthly_rate(annual_return_pct);
    let mut bal = balance;
    let mut monthly_withdrawal = annual_withdrawal / 12.0;
    let mut years = Vec::new();
    let mut total_withdrawn = 0.0;
    let mut total_interest = 0.0;
    let mut depleted = bal <= 0.0;

    while !depleted && (years.len() as u32) < max_years {
        let start_balance = bal;
        let mut withdrawal = 0.0;
        let mut interest = 0.0;

        for _ in 0..12 {
            let accrued = bal * rate;
            bal += accrued;
            interest += accrued;
            let taken = monthly_withdrawal.min(bal);
            bal -= taken;
            withdrawal += taken;
            if bal <= 0.0 {
                bal = 0.0;
                depleted = true;
                break;
            }
        }

        total_withdrawn += withdrawal;
        total_interest += interest;
        years.push(DrawdownYear {
            year: years.len() as u32 + 1,
            start_balance,
            withdrawal,
            interest,
            end_balance: bal,
        });

        monthly_withdrawal *= 1.0 + inflation_pct / 100.0;
    }

    Drawdown {
        years,
        depleted,
        total_withdrawn,
        total_interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_no_growth_runs_out_on_schedule() {
        let dd = simulate_drawdown(120_000.0, 24_000.0, 0.0, 0.0, 80);
        assert!(dd.depleted);
        assert_eq!(dd.years.len(), 5);
        assert_eq!(dd.years.last().unwrap().end_balance, 0.0);
        assert_abs_diff_eq!(dd.total_withdrawn, 120_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_partial_final_year() {
        let dd = simulate_drawdown(30_000.0, 12_000.0, 0.0, 0.0, 80);
        assert!(dd.depleted);
        assert_eq!(dd.years.len(), 3);
        assert_abs_diff_eq!(dd.years[2].withdrawal, 6_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inflation_raises_withdrawals() {
        let dd = simulate_drawdown(1_000_000.0, 40_000.0, 0.0, 3.0, 80);
        assert_abs_diff_eq!(dd.years[0].withdrawal, 40_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dd.years[1].withdrawal, 41_200.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sustainable_withdrawal_hits_horizon() {
        // 6% return on 1M earns ~61.7k/yr, well above a flat 30k withdrawal
        let dd = simulate_drawdown(1_000_000.0, 30_000.0, 6.0, 0.0, 80);
        assert!(!dd.depleted);
        assert_eq!(dd.years.len(), 80);
        assert!(dd.years.last().unwrap().end_balance > 1_000_000.0);
    }

    #[test]
    fn test_balance_identity() {
        let dd = simulate_drawdown(500_000.0, 45_000.0, 5.0, 2.5, 80);
        let last = dd.years.last().unwrap();
        assert_abs_diff_eq!(
            500_000.0 + dd.total_interest - dd.total_withdrawn,
            last.end_balance,
            epsilon = 1e-4
        );
    }
}
