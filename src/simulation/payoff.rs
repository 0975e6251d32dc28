//! Fixed-payment payoff of a single balance

use log::warn;
use serde::{Deserialize, Serialize};

use crate::math::{monthly_rate, round2};

/// One month of a payoff schedule, rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffRow {
    pub month: u32,
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub balance: f64,
}

/// Result of running a payoff loop to completion or to its cap
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffSimulation {
    pub rows: Vec<PayoffRow>,
    pub months: u32,
    /// Unrounded interest accrued over the run
    pub total_interest: f64,
    /// Unrounded sum of payments made
    pub total_paid: f64,
    /// False when the cap stopped the loop before the balance cleared
    pub paid_off: bool,
}

/// True when `payment` cannot outpace the interest accruing on `balance`
pub fn never_pays_off(balance: f64, monthly_rate: f64, payment: f64) -> bool {
    payment <= balance * monthly_rate
}

/// Apply a fixed monthly `payment` until the balance falls to `paid_threshold`
///
/// Each month accrues interest first, then pays `min(balance + interest, payment)`.
/// Runs at most `max_months` iterations.
pub fn simulate_payoff(
    balance: f64,
    annual_rate_pct: f64,
    payment: f64,
    max_months: u32,
    paid_threshold: f64,
) -> PayoffSimulation {
    let rate = monthly_rate(annual_rate_pct);
    let mut bal = balance;
    let mut months = 0;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut rows = Vec::new();

    while bal > paid_threshold && months < max_months {
        months += 1;
        let interest = bal * rate;
        let pay = (bal + interest).min(payment);
        let principal = pay - interest;
        bal -= principal;

        total_interest += interest;
        total_paid += pay;

        rows.push(PayoffRow {
            month: months,
            payment: round2(pay),
            principal_paid: round2(principal),
            interest_paid: round2(interest),
            balance: round2(bal.max(0.0)),
        });
    }

    let paid_off = bal <= paid_threshold;
    if !paid_off {
        warn!(
            "payoff of {:.2} at {}% paying {:.2} still owes {:.2} after {} months",
            balance, annual_rate_pct, payment, bal, months
        );
    }

    PayoffSimulation {
        rows,
        months,
        total_interest,
        total_paid,
        paid_off,
    }
}
