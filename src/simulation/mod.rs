//! Month-by-month simulators for payoff, saving and drawdown
//!
//! Every loop is bounded by a cap from [`crate::assumptions::IterationLimits`].
//! Where a closed-form convergence check exists (payment at or below the
//! first month's interest) it runs before the loop, so the cap is only a
//! backstop.

mod accumulation;
mod debt_plan;
mod drawdown;
mod payoff;

pub use accumulation::{accumulate_until, accumulate_years, months_to_goal, Accumulation, AccumulationYear, GoalProgress};
pub use debt_plan::{plan_debt_payoff, Debt, DebtPayoffStep, DebtPlan, PayoffStrategy};
pub use drawdown::{simulate_drawdown, Drawdown, DrawdownYear};
pub use payoff::{never_pays_off, simulate_payoff, PayoffRow, PayoffSimulation};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A count of periods that may never be reached
///
/// Serializes as `{"finite": 14}` or `"never"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Horizon {
    Finite(u32),
    Never,
}

impl Horizon {
    pub fn finite(self) -> Option<u32> {
        match self {
            Horizon::Finite(n) => Some(n),
            Horizon::Never => None,
        }
    }

    pub fn is_never(self) -> bool {
        matches!(self, Horizon::Never)
    }

    /// Round a fractional period count up; counts past `cap` (or not finite) never arrive
    pub fn ceil_within(periods: f64, cap: u32) -> Self {
        let whole = periods.ceil();
        if whole.is_finite() && whole >= 0.0 && whole <= cap as f64 {
            Horizon::Finite(whole as u32)
        } else {
            Horizon::Never
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Horizon::Finite(n) => write!(f, "{}", n),
            Horizon::Never => write!(f, "never"),
        }
    }
}
