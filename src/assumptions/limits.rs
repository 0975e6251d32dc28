//! Underwriting ratios and simulation bounds

/// Debt-to-income ceilings used by the affordability calculator (28/36 rule)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DtiLimits {
    /// Max share of gross monthly income spent on housing
    pub front_end: f64,
    /// Max share of gross monthly income spent on housing plus other debts
    pub back_end: f64,
}

impl Default for DtiLimits {
    fn default() -> Self {
        Self {
            front_end: 0.28,
            back_end: 0.36,
        }
    }
}

/// Hard caps on the month-by-month loops
///
/// A loop that reaches its cap reports the never-finishes outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationLimits {
    /// Single-balance payoff (credit card, current debts)
    pub payoff_months: u32,
    /// Multi-debt avalanche/snowball plan
    pub plan_months: u32,
    /// Retirement drawdown
    pub drawdown_years: u32,
    /// Saving toward a target balance (millionaire)
    pub target_years: u32,
    /// Savings goal
    pub goal_months: u32,
    /// Balance at or below which a debt counts as paid
    pub paid_threshold: f64,
}

impl Default for IterationLimits {
    fn default() -> Self {
        Self {
            payoff_months: 1200,
            plan_months: 600,
            drawdown_years: 80,
            target_years: 100,
            goal_months: 1200,
            paid_threshold: 0.01,
        }
    }
}
