//! Multi-debt payoff planning with avalanche or snowball ordering

use log::warn;
use serde::{Deserialize, Serialize};

use crate::assumptions::IterationLimits;
use crate::math::{monthly_rate, round2};

/// One debt as entered on the planner form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub name: String,
    pub balance: f64,
    /// Annual rate as a percentage
    pub rate: f64,
    pub min_payment: f64,
}

/// Which open debt receives the extra payment first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest interest rate first
    Avalanche,
    /// Lowest remaining balance first
    Snowball,
}

/// Payment applied to one debt in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffStep {
    pub month: u32,
    pub debt_name: String,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPlan {
    pub strategy: PayoffStrategy,
    pub total_months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    /// Debt names in the order they were cleared
    pub payoff_order: Vec<String>,
    pub schedule: Vec<DebtPayoffStep>,
    /// False when the month cap was reached with debts still open
    pub all_paid_off: bool,
}

/// Working state for one debt during the simulation
struct OpenDebt<'a> {
    debt: &'a Debt,
    balance: f64,
    rate: f64,
    paid: bool,
}

/// Unrounded amounts for one debt within the current month
#[derive(Default, Clone, Copy)]
struct MonthEntry {
    payment: f64,
    interest: f64,
    balance: f64,
}

/// Simulate paying down `debts` with minimums plus `extra_monthly`
///
/// Every month, each open debt accrues interest and receives its minimum
/// payment (capped at its balance). The extra budget then goes to the open
/// debts in strategy order, re-ranked every month; whatever one debt does
/// not absorb cascades to the next. With `rollover`, the minimum of every
/// debt already cleared joins the extra budget from the following month.
pub fn plan_debt_payoff(
    debts: &[Debt],
    extra_monthly: f64,
    strategy: PayoffStrategy,
    rollover: bool,
    limits: &IterationLimits,
) -> DebtPlan {
    let threshold = limits.paid_threshold;
    let mut open: Vec<OpenDebt> = debts
        .iter()
        .map(|debt| OpenDebt {
            debt,
            balance: debt.balance,
            rate: monthly_rate(debt.rate),
            paid: debt.balance <= threshold,
        })
        .collect();

    let mut payoff_order: Vec<usize> = open
        .iter()
        .enumerate()
        .filter(|(_, d)| d.paid)
        .map(|(i, _)| i)
        .collect();
    let mut schedule = Vec::new();
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut freed_minimums = 0.0;
    let mut month = 0;

    while open.iter().any(|d| !d.paid) && month < limits.plan_months {
        month += 1;
        let mut entries: Vec<Option<MonthEntry>> = vec![None; open.len()];
        let mut cleared_this_month = Vec::new();

        // interest and minimums
        for (i, d) in open.iter_mut().enumerate() {
            if d.paid {
                continue;
            }
            let interest = d.balance * d.rate;
            d.balance += interest;
            let payment = d.debt.min_payment.min(d.balance);
            d.balance -= payment;

            total_interest += interest;
            total_paid += payment;
            entries[i] = Some(MonthEntry {
                payment,
                interest,
                balance: d.balance,
            });

            if d.balance <= threshold {
                d.paid = true;
                cleared_this_month.push(i);
            }
        }

        // extra toward the strategy's targets
        let mut extra_left = extra_monthly + if rollover { freed_minimums } else { 0.0 };
        for i in target_order(&open, strategy) {
            if extra_left <= 0.0 {
                break;
            }
            let d = &mut open[i];
            let pay = extra_left.min(d.balance);
            d.balance -= pay;
            extra_left -= pay;
            total_paid += pay;

            if let Some(entry) = entries[i].as_mut() {
                entry.payment += pay;
                entry.balance = d.balance;
            }
            if d.balance <= threshold {
                d.paid = true;
                cleared_this_month.push(i);
            }
        }

        for &i in &cleared_this_month {
            freed_minimums += open[i].debt.min_payment;
        }
        payoff_order.extend(cleared_this_month);

        for (i, entry) in entries.into_iter().enumerate() {
            if let Some(entry) = entry {
                schedule.push(DebtPayoffStep {
                    month,
                    debt_name: open[i].debt.name.clone(),
                    payment: round2(entry.payment),
                    interest: round2(entry.interest),
                    principal: round2(entry.payment - entry.interest),
                    balance: round2(entry.balance.max(0.0)),
                });
            }
        }
    }

    let all_paid_off = open.iter().all(|d| d.paid);
    if !all_paid_off {
        warn!(
            "{:?} plan for {} debts still open after {} months",
            strategy,
            open.iter().filter(|d| !d.paid).count(),
            month
        );
    }

    DebtPlan {
        strategy,
        total_months: month,
        total_interest: round2(total_interest),
        total_paid: round2(total_paid),
        payoff_order: payoff_order
            .into_iter()
            .map(|i| debts[i].name.clone())
            .collect(),
        schedule,
        all_paid_off,
    }
}

/// Indices of open debts ranked for extra payments; ties keep input order
fn target_order(open: &[OpenDebt], strategy: PayoffStrategy) -> Vec<usize> {
    let mut targets: Vec<usize> = (0..open.len()).filter(|&i| !open[i].paid).collect();
    match strategy {
        PayoffStrategy::Avalanche => {
            targets.sort_by(|&a, &b| open[b].debt.rate.total_cmp(&open[a].debt.rate))
        }
        PayoffStrategy::Snowball => {
            targets.sort_by(|&a, &b| open[a].balance.total_cmp(&open[b].balance))
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn debt(name: &str, balance: f64, rate: f64, min_payment: f64) -> Debt {
        Debt {
            name: name.to_string(),
            balance,
            rate,
            min_payment,
        }
    }

    fn step<'a>(plan: &'a DebtPlan, month: u32, name: &str) -> &'a DebtPayoffStep {
        plan.schedule
            .iter()
            .find(|s| s.month == month && s.debt_name == name)
            .expect("missing schedule step")
    }

    fn mixed_debts() -> Vec<Debt> {
        vec![
            debt("Car", 2_000.0, 5.0, 40.0),
            debt("Card", 2_000.0, 25.0, 40.0),
            debt("Store", 2_000.0, 15.0, 40.0),
        ]
    }

    #[test]
    fn test_avalanche_targets_highest_rate() {
        let plan = plan_debt_payoff(&mixed_debts(), 300.0, PayoffStrategy::Avalanche, false, &IterationLimits::default());

        assert_eq!(step(&plan, 1, "Card").payment, 340.0);
        assert_eq!(step(&plan, 1, "Car").payment, 40.0);
        assert_eq!(step(&plan, 1, "Store").payment, 40.0);
        assert_eq!(plan.payoff_order, vec!["Card", "Store", "Car"]);
        assert!(plan.all_paid_off);
    }

    #[test]
    fn test_snowball_targets_lowest_balance() {
        let debts = vec![
            debt("Card", 4_000.0, 24.0, 80.0),
            debt("Medical", 500.0, 0.0, 25.0),
            debt("Loan", 1_500.0, 9.0, 40.0),
        ];
        let plan = plan_debt_payoff(&debts, 200.0, PayoffStrategy::Snowball, false, &IterationLimits::default());

        assert_eq!(step(&plan, 1, "Medical").payment, 225.0);
        assert_eq!(step(&plan, 1, "Card").payment, 80.0);
        assert_eq!(plan.payoff_order, vec!["Medical", "Loan", "Card"]);
    }

    #[test]
    fn test_extra_cascades_past_cleared_debt() {
        let debts = vec![debt("Small", 100.0, 0.0, 10.0), debt("Big", 1_000.0, 0.0, 10.0)];
        let plan = plan_debt_payoff(&debts, 200.0, PayoffStrategy::Snowball, false, &IterationLimits::default());

        // Small takes 90 of the extra, Big takes the remaining 110
        assert_eq!(step(&plan, 1, "Small").payment, 100.0);
        assert_eq!(step(&plan, 1, "Big").payment, 120.0);
        assert_eq!(step(&plan, 1, "Big").balance, 880.0);
        assert_eq!(plan.payoff_order[0], "Small");
    }

    #[test]
    fn test_payoff_order_is_permutation() {
        for strategy in [PayoffStrategy::Avalanche, PayoffStrategy::Snowball] {
            let plan = plan_debt_payoff(&mixed_debts(), 150.0, strategy, false, &IterationLimits::default());
            let mut order = plan.payoff_order.clone();
            order.sort();
            assert_eq!(order, vec!["Car", "Card", "Store"]);
        }
    }

    #[test]
    fn test_totals_balance() {
        let debts = mixed_debts();
        let plan = plan_debt_payoff(&debts, 300.0, PayoffStrategy::Avalanche, false, &IterationLimits::default());
        let principal: f64 = debts.iter().map(|d| d.balance).sum();
        assert_abs_diff_eq!(plan.total_paid, principal + plan.total_interest, epsilon = 0.05);
    }

    #[test]
    fn test_rollover_finishes_no_later() {
        let limits = IterationLimits::default();
        let fixed = plan_debt_payoff(&mixed_debts(), 100.0, PayoffStrategy::Avalanche, false, &limits);
        let rolled = plan_debt_payoff(&mixed_debts(), 100.0, PayoffStrategy::Avalanche, true, &limits);

        assert!(rolled.total_months <= fixed.total_months);
        assert!(rolled.total_interest <= fixed.total_interest);
    }

    #[test]
    fn test_cap_reports_unpaid() {
        let limits = IterationLimits { plan_months: 24, ..IterationLimits::default() };
        let debts = vec![debt("Card", 10_000.0, 24.0, 50.0)];
        let plan = plan_debt_payoff(&debts, 0.0, PayoffStrategy::Avalanche, false, &limits);

        assert!(!plan.all_paid_off);
        assert_eq!(plan.total_months, 24);
        assert!(plan.payoff_order.is_empty());
    }

    #[test]
    fn test_identical_inputs_identical_plans() {
        let a = plan_debt_payoff(&mixed_debts(), 250.0, PayoffStrategy::Snowball, true, &IterationLimits::default());
        let b = plan_debt_payoff(&mixed_debts(), 250.0, PayoffStrategy::Snowball, true, &IterationLimits::default());
        assert_eq!(a, b);
    }
}
