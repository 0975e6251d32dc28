//! Saving with monthly contributions: fixed horizon, target balance, or goal

use log::warn;

use crate::math::monthly_rate;

/// One year of saving, unrounded
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationYear {
    /// 1-based year index
    pub year: u32,
    pub start_balance: f64,
    pub contribution: f64,
    pub interest: f64,
    pub end_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    pub years: Vec<AccumulationYear>,
    pub balance: f64,
    /// Contributions made during the run (the starting balance is not included)
    pub contributed: f64,
    pub interest: f64,
}

impl Accumulation {
    fn new(initial: f64) -> Self {
        Self {
            years: Vec::new(),
            balance: initial,
            contributed: 0.0,
            interest: 0.0,
        }
    }

    /// Twelve months of interest-then-contribution
    fn step_year(&mut self, rate: f64, monthly_contribution: f64) {
        let start_balance = self.balance;
        let mut contribution = 0.0;
        let mut interest = 0.0;

        for _ in 0..12 {
            let accrued = self.balance * rate;
            self.balance += accrued + monthly_contribution;
            contribution += monthly_contribution;
            interest += accrued;
        }

        self.contributed += contribution;
        self.interest += interest;
        self.years.push(AccumulationYear {
            year: self.years.len() as u32 + 1,
            start_balance,
            contribution,
            interest,
            end_balance: self.balance,
        });
    }
}

/// Save for a fixed number of years
///
/// The monthly contribution grows by `contribution_growth_pct` after each year.
pub fn accumulate_years(
    initial: f64,
    annual_rate_pct: f64,
    monthly_contribution: f64,
    years: u32,
    contribution_growth_pct: f64,
) -> Accumulation {
    let rate = monthly_rate(annual_rate_pct);
    let mut acc = Accumulation::new(initial);
    let mut contribution = monthly_contribution;

    for _ in 0..years {
        acc.step_year(rate, contribution);
        contribution *= 1.0 + contribution_growth_pct / 100.0;
    }

    acc
}

/// Save whole years until the balance reaches `target`, for at most `max_years`
///
/// Returns the run and whether the target was reached.
pub fn accumulate_until(
    initial: f64,
    annual_rate_pct: f64,
    monthly_contribution: f64,
    target: f64,
    max_years: u32,
) -> (Accumulation, bool) {
    let rate = monthly_rate(annual_rate_pct);
    let mut acc = Accumulation::new(initial);

    while acc.balance < target && (acc.years.len() as u32) < max_years {
        acc.step_year(rate, monthly_contribution);
    }

    let reached = acc.balance >= target;
    if !reached {
        warn!("balance {:.2} short of target {:.2} after {} years", acc.balance, target, max_years);
    }
    (acc, reached)
}

/// Month-by-month progress toward a savings goal
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub months: u32,
    pub balance: f64,
    pub interest: f64,
    pub reached: bool,
}

/// Count months of interest-then-contribution until `goal` is reached
pub fn months_to_goal(
    initial: f64,
    annual_rate_pct: f64,
    monthly_contribution: f64,
    goal: f64,
    max_months: u32,
) -> GoalProgress {
    let rate = monthly_rate(annual_rate_pct);
    let mut balance = initial;
    let mut months = 0;
    let mut interest = 0.0;

    while balance < goal && months < max_months {
        months += 1;
        let accrued = balance * rate;
        balance += accrued + monthly_contribution;
        interest += accrued;
    }

    GoalProgress {
        months,
        balance,
        interest,
        reached: balance >= goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fixed_horizon_matches_closed_form() {
        // interest then contribution each month is an annuity-immediate
        let acc = accumulate_years(10_000.0, 6.0, 500.0, 20, 0.0);
        let r: f64 = 0.005;
        let n = 240;
        let expected = 10_000.0 * (1.0 + r).powi(n) + 500.0 * ((1.0 + r).powi(n) - 1.0) / r;

        assert_eq!(acc.years.len(), 20);
        assert_abs_diff_eq!(acc.balance, expected, epsilon = 1e-6);
        assert_abs_diff_eq!(acc.contributed, 120_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(acc.balance, 10_000.0 + acc.contributed + acc.interest, epsilon = 1e-6);
    }

    #[test]
    fn test_contribution_growth() {
        let acc = accumulate_years(0.0, 0.0, 100.0, 3, 10.0);
        let yearly: Vec<f64> = acc.years.iter().map(|y| y.contribution).collect();
        assert_abs_diff_eq!(yearly[0], 1_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(yearly[1], 1_320.0, epsilon = 1e-9);
        assert_abs_diff_eq!(yearly[2], 1_452.0, epsilon = 1e-9);
    }

    #[test]
    fn test_year_rows_chain() {
        let acc = accumulate_years(5_000.0, 7.0, 250.0, 5, 2.0);
        for pair in acc.years.windows(2) {
            assert_eq!(pair[0].end_balance, pair[1].start_balance);
        }
        assert_eq!(acc.years[0].start_balance, 5_000.0);
    }

    #[test]
    fn test_until_target() {
        let (acc, reached) = accumulate_until(0.0, 0.0, 1_000.0, 36_000.0, 100);
        assert!(reached);
        assert_eq!(acc.years.len(), 3);

        let (acc, reached) = accumulate_until(50_000.0, 5.0, 100.0, 10_000.0, 100);
        assert!(reached);
        assert!(acc.years.is_empty());
    }

    #[test]
    fn test_until_target_capped() {
        let (acc, reached) = accumulate_until(0.0, 0.0, 10.0, 1_000_000.0, 100);
        assert!(!reached);
        assert_eq!(acc.years.len(), 100);
    }

    #[test]
    fn test_months_to_goal() {
        let progress = months_to_goal(0.0, 0.0, 250.0, 1_000.0, 1200);
        assert!(progress.reached);
        assert_eq!(progress.months, 4);

        let progress = months_to_goal(0.0, 0.0, 0.0, 1_000.0, 1200);
        assert!(!progress.reached);
        assert_eq!(progress.months, 1200);
    }
}
