//! Paying down debt: credit cards, extra loan payments, consolidation and multi-debt plans

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::payment_date;
use crate::assumptions::Assumptions;
use crate::error::ValidationErrors;
use crate::math::{monthly_rate, round2, solve_for_payment};
use crate::simulation::{
    never_pays_off, plan_debt_payoff, simulate_payoff, Debt, DebtPlan, PayoffRow, PayoffStrategy,
};
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};

/// How a fixed-payment payoff ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PayoffOutcome {
    #[serde(rename_all = "camelCase")]
    PaidOff {
        months: u32,
        total_interest: f64,
        total_paid: f64,
    },
    /// The payment never outpaces the interest
    NeverPaysOff,
}

impl PayoffOutcome {
    pub fn months(&self) -> Option<u32> {
        match self {
            PayoffOutcome::PaidOff { months, .. } => Some(*months),
            PayoffOutcome::NeverPaysOff => None,
        }
    }
}

/// Record errors for every debt in a list, keyed `debts[i].field`
fn validate_debts(v: &mut Validator, debts: &[Debt]) {
    v.non_empty_list("debts", debts, "add at least one debt");
    for (i, debt) in debts.iter().enumerate() {
        v.non_empty(&format!("debts[{}].name", i), &debt.name)
            .positive(&format!("debts[{}].balance", i), debt.balance)
            .range(&format!("debts[{}].rate", i), debt.rate, 0.0, 50.0)
            .positive(&format!("debts[{}].minPayment", i), debt.min_payment);
    }
}

// ============================================================================
// Credit card payoff
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPayoffInput {
    pub balance: f64,
    pub apr: f64,
    pub monthly_payment: f64,
}

impl Validate for CreditCardPayoffInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("balance", self.balance, 1.0, 1_000_000.0)
            .range("apr", self.apr, 0.01, 100.0)
            .range("monthlyPayment", self.monthly_payment, 1.0, 1_000_000.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPayoffResult {
    #[serde(flatten)]
    pub outcome: PayoffOutcome,
    /// Empty when the balance never pays off
    pub schedule: Vec<PayoffRow>,
}

pub struct CreditCardPayoff;

impl Calculator for CreditCardPayoff {
    const KIND: CalculatorKind = CalculatorKind::CreditCardPayoff;
    type Input = CreditCardPayoffInput;
    type Output = CreditCardPayoffResult;

    fn calculate(input: &CreditCardPayoffInput, assumptions: &Assumptions) -> CreditCardPayoffResult {
        let never = CreditCardPayoffResult {
            outcome: PayoffOutcome::NeverPaysOff,
            schedule: Vec::new(),
        };
        if never_pays_off(input.balance, monthly_rate(input.apr), input.monthly_payment) {
            return never;
        }

        let limits = &assumptions.limits;
        let sim = simulate_payoff(
            input.balance,
            input.apr,
            input.monthly_payment,
            limits.payoff_months,
            limits.paid_threshold,
        );
        if !sim.paid_off {
            return never;
        }

        CreditCardPayoffResult {
            outcome: PayoffOutcome::PaidOff {
                months: sim.months,
                total_interest: round2(sim.total_interest),
                total_paid: round2(input.balance + sim.total_interest),
            },
            schedule: sim.rows,
        }
    }
}

// ============================================================================
// Loan payoff with extra payments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayoffInput {
    pub balance: f64,
    pub rate: f64,
    pub remaining_months: f64,
    #[serde(default)]
    pub extra_payment: f64,
    pub start_date: NaiveDate,
}

impl Validate for LoanPayoffInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("balance", self.balance, 100.0, 10_000_000.0)
            .range("rate", self.rate, 0.01, 50.0)
            .whole("remainingMonths", self.remaining_months, 1.0, 600.0)
            .range("extraPayment", self.extra_payment, 0.0, 1_000_000.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayoffResult {
    pub original_months: u32,
    pub new_months: u32,
    pub months_saved: u32,
    pub original_total_interest: f64,
    pub new_total_interest: f64,
    pub interest_saved: f64,
    /// Date of the final payment with the extra applied
    pub payoff_date: NaiveDate,
    pub schedule: Vec<PayoffRow>,
}

pub struct LoanPayoff;

impl Calculator for LoanPayoff {
    const KIND: CalculatorKind = CalculatorKind::LoanPayoff;
    type Input = LoanPayoffInput;
    type Output = LoanPayoffResult;

    fn calculate(input: &LoanPayoffInput, assumptions: &Assumptions) -> LoanPayoffResult {
        let remaining = input.remaining_months as u32;
        let base_payment = solve_for_payment(input.balance, input.rate, remaining);
        let original_interest = round2(base_payment * remaining as f64 - input.balance);

        // base payment alone finishes within remaining_months
        let sim = simulate_payoff(
            input.balance,
            input.rate,
            base_payment + input.extra_payment,
            remaining * 2,
            assumptions.limits.paid_threshold,
        );

        LoanPayoffResult {
            original_months: remaining,
            new_months: sim.months,
            months_saved: remaining.saturating_sub(sim.months),
            original_total_interest: original_interest,
            new_total_interest: round2(sim.total_interest),
            interest_saved: round2(original_interest - sim.total_interest),
            payoff_date: payment_date(input.start_date, sim.months),
            schedule: sim.rows,
        }
    }
}

// ============================================================================
// Debt consolidation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtConsolidationInput {
    pub debts: Vec<Debt>,
    pub consolidation_rate: f64,
    pub consolidation_term_months: f64,
}

impl Validate for DebtConsolidationInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        validate_debts(&mut v, &self.debts);
        v.range("consolidationRate", self.consolidation_rate, 0.0, 30.0)
            .whole("consolidationTermMonths", self.consolidation_term_months, 6.0, 360.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtConsolidationResult {
    pub current_total_balance: f64,
    pub current_total_min_payment: f64,
    /// Balance-weighted average rate, percent
    pub current_weighted_rate: f64,
    /// Interest paying only minimums; absent when some debt never pays off
    pub current_total_interest: Option<f64>,
    pub new_monthly_payment: f64,
    pub new_total_interest: f64,
    pub new_total_paid: f64,
    pub monthly_savings: f64,
    pub interest_savings: Option<f64>,
}

pub struct DebtConsolidation;

impl Calculator for DebtConsolidation {
    const KIND: CalculatorKind = CalculatorKind::DebtConsolidation;
    type Input = DebtConsolidationInput;
    type Output = DebtConsolidationResult;

    fn calculate(input: &DebtConsolidationInput, assumptions: &Assumptions) -> DebtConsolidationResult {
        let limits = &assumptions.limits;
        let total_balance: f64 = input.debts.iter().map(|d| d.balance).sum();
        let total_min: f64 = input.debts.iter().map(|d| d.min_payment).sum();
        let weighted_rate = if total_balance > 0.0 {
            input.debts.iter().map(|d| d.rate * d.balance).sum::<f64>() / total_balance
        } else {
            0.0
        };

        let current_interest = input.debts.iter().try_fold(0.0, |acc, debt| {
            if never_pays_off(debt.balance, monthly_rate(debt.rate), debt.min_payment) {
                return None;
            }
            let sim = simulate_payoff(
                debt.balance,
                debt.rate,
                debt.min_payment,
                limits.payoff_months,
                limits.paid_threshold,
            );
            sim.paid_off.then_some(acc + sim.total_interest)
        });

        let term = input.consolidation_term_months as u32;
        let new_payment = solve_for_payment(total_balance, input.consolidation_rate, term);
        let new_total_paid = new_payment * term as f64;
        let new_interest = new_total_paid - total_balance;

        DebtConsolidationResult {
            current_total_balance: round2(total_balance),
            current_total_min_payment: round2(total_min),
            current_weighted_rate: round2(weighted_rate),
            current_total_interest: current_interest.map(round2),
            new_monthly_payment: round2(new_payment),
            new_total_interest: round2(new_interest),
            new_total_paid: round2(new_total_paid),
            monthly_savings: round2(total_min - new_payment),
            interest_savings: current_interest.map(|current| round2(current - new_interest)),
        }
    }
}

// ============================================================================
// Debt payoff planner
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffPlannerInput {
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub extra_monthly: f64,
    pub strategy: PayoffStrategy,
    /// Add each cleared debt's minimum to the extra budget
    #[serde(default)]
    pub rollover: bool,
}

impl Validate for DebtPayoffPlannerInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        validate_debts(&mut v, &self.debts);
        v.at_least("extraMonthly", self.extra_monthly, 0.0);
        v.finish()
    }
}

pub struct DebtPayoffPlanner;

impl Calculator for DebtPayoffPlanner {
    const KIND: CalculatorKind = CalculatorKind::DebtPayoffPlanner;
    type Input = DebtPayoffPlannerInput;
    type Output = DebtPlan;

    fn calculate(input: &DebtPayoffPlannerInput, assumptions: &Assumptions) -> DebtPlan {
        plan_debt_payoff(
            &input.debts,
            input.extra_monthly,
            input.strategy,
            input.rollover,
            &assumptions.limits,
        )
    }
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

    #[test]
    fn test_credit_card_pays_off() {
        let input = CreditCardPayoffInput {
            balance: 5_000.0,
            apr: 22.99,
            monthly_payment: 100.0,
        };
        let result = CreditCardPayoff::run(&input, &Assumptions::default()).unwrap();

        match result.outcome {
            PayoffOutcome::PaidOff {
                months,
                total_interest,
                total_paid,
            } => {
                assert!(months > 0);
                assert_eq!(months as usize, result.schedule.len());
                assert!(total_interest > 0.0);
                assert_abs_diff_eq!(total_paid, 5_000.0 + total_interest, epsilon = 0.011);
            }
            PayoffOutcome::NeverPaysOff => panic!("expected payoff"),
        }
    }

    #[test]
    fn test_credit_card_never_pays_off() {
        // 10,000 at 24% accrues exactly 200 the first month
        let input = CreditCardPayoffInput {
            balance: 10_000.0,
            apr: 24.0,
            monthly_payment: 200.0,
        };
        let result = CreditCardPayoff::calculate(&input, &Assumptions::default());
        assert_eq!(result.outcome, PayoffOutcome::NeverPaysOff);
        assert!(result.schedule.is_empty());
        assert_eq!(result.outcome.months(), None);
    }

    #[test]
    fn test_credit_card_outcome_json() {
        let input = CreditCardPayoffInput {
            balance: 350.0,
            apr: 0.01,
            monthly_payment: 100.0,
        };
        let result = CreditCardPayoff::calculate(&input, &Assumptions::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "paidOff");
        assert_eq!(json["months"], 4);
        assert!(json["totalInterest"].is_number());

        let never = serde_json::to_value(PayoffOutcome::NeverPaysOff).unwrap();
        assert_eq!(never["status"], "neverPaysOff");
    }

    #[test]
    fn test_loan_payoff_extra_saves_time_and_interest() {
        let input = LoanPayoffInput {
            balance: 20_000.0,
            rate: 6.0,
            remaining_months: 60.0,
            extra_payment: 100.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let result = LoanPayoff::run(&input, &Assumptions::default()).unwrap();

        assert!(result.new_months < 60);
        assert_eq!(result.months_saved, 60 - result.new_months);
        assert!(result.interest_saved > 0.0);
        assert_eq!(result.schedule.len(), result.new_months as usize);
        assert_eq!(result.payoff_date, payment_date(input.start_date, result.new_months));
    }

    #[test]
    fn test_loan_payoff_without_extra_keeps_schedule() {
        let input = LoanPayoffInput {
            balance: 10_000.0,
            rate: 5.0,
            remaining_months: 36.0,
            extra_payment: 0.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let result = LoanPayoff::calculate(&input, &Assumptions::default());
        assert_eq!(result.new_months, 36);
        assert_eq!(result.months_saved, 0);
        assert_abs_diff_eq!(result.interest_saved, 0.0, epsilon = 0.011);
    }

    #[test]
    fn test_consolidation() {
        let input = DebtConsolidationInput {
            debts: vec![debt("Card", 6_000.0, 22.0, 180.0), debt("Store", 2_000.0, 26.0, 60.0)],
            consolidation_rate: 9.0,
            consolidation_term_months: 36.0,
        };
        let result = DebtConsolidation::run(&input, &Assumptions::default()).unwrap();

        assert_eq!(result.current_total_balance, 8_000.0);
        assert_eq!(result.current_total_min_payment, 240.0);
        assert_eq!(result.current_weighted_rate, 23.0);
        let current = result.current_total_interest.unwrap();
        assert!(current > result.new_total_interest);
        assert_abs_diff_eq!(
            result.interest_savings.unwrap(),
            current - result.new_total_interest,
            epsilon = 0.011
        );
    }

    #[test]
    fn test_consolidation_minimum_below_interest() {
        let input = DebtConsolidationInput {
            debts: vec![debt("Card", 10_000.0, 24.0, 150.0)],
            consolidation_rate: 10.0,
            consolidation_term_months: 60.0,
        };
        let result = DebtConsolidation::calculate(&input, &Assumptions::default());
        assert_eq!(result.current_total_interest, None);
        assert_eq!(result.interest_savings, None);
        assert!(result.new_monthly_payment > 0.0);
    }

    #[test]
    fn test_debt_list_validation() {
        let input = DebtPayoffPlannerInput {
            debts: vec![debt("", 1_000.0, 60.0, 0.0)],
            extra_monthly: -5.0,
            strategy: PayoffStrategy::Avalanche,
            rollover: false,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.message_for("debts[0].name"), Some("is required"));
        assert_eq!(errors.message_for("debts[0].rate"), Some("must be at most 50"));
        assert_eq!(errors.message_for("debts[0].minPayment"), Some("must be positive"));
        assert!(errors.message_for("extraMonthly").is_some());

        let empty = DebtConsolidationInput {
            debts: Vec::new(),
            consolidation_rate: 5.0,
            consolidation_term_months: 24.0,
        };
        let errors = empty.validate().unwrap_err();
        assert_eq!(errors.message_for("debts"), Some("add at least one debt"));
    }

    #[test]
    fn test_planner_avalanche_order() {
        let input = DebtPayoffPlannerInput {
            debts: vec![
                debt("Car", 2_000.0, 5.0, 40.0),
                debt("Card", 2_000.0, 25.0, 40.0),
                debt("Store", 2_000.0, 15.0, 40.0),
            ],
            extra_monthly: 300.0,
            strategy: PayoffStrategy::Avalanche,
            rollover: false,
        };
        let plan = DebtPayoffPlanner::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(plan.payoff_order, vec!["Card", "Store", "Car"]);
        assert!(plan.all_paid_off);
    }
}
