//! Fixed-rate loan calculators: mortgage, loan payment, comparison, refinance and HELOC

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{generate_amortization, AmortizationRow, LoanSummary};
use crate::assumptions::Assumptions;
use crate::math::{round2, solve_for_payment, total_interest};
use crate::simulation::Horizon;
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};
use crate::error::ValidationErrors;

/// Payment summary plus the full amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledLoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationRow>,
}

impl ScheduledLoanResult {
    fn compute(principal: f64, annual_rate_pct: f64, total_payments: u32, start: NaiveDate) -> Self {
        let summary = LoanSummary::compute(principal, annual_rate_pct, total_payments);
        Self {
            monthly_payment: summary.monthly_payment,
            total_payment: summary.total_payment,
            total_interest: summary.total_interest,
            schedule: generate_amortization(principal, annual_rate_pct, total_payments, start),
        }
    }
}

// ============================================================================
// Mortgage
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageInput {
    pub amount: f64,
    /// Annual rate, percent
    pub rate: f64,
    /// Whole years
    pub years: f64,
    pub start_date: NaiveDate,
}

impl Validate for MortgageInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("amount", self.amount, 1_000.0, 10_000_000.0)
            .range("rate", self.rate, 0.01, 30.0)
            .whole("years", self.years, 1.0, 50.0);
        v.finish()
    }
}

pub struct Mortgage;

impl Calculator for Mortgage {
    const KIND: CalculatorKind = CalculatorKind::Mortgage;
    type Input = MortgageInput;
    type Output = ScheduledLoanResult;

    fn calculate(input: &MortgageInput, _: &Assumptions) -> ScheduledLoanResult {
        ScheduledLoanResult::compute(input.amount, input.rate, input.years as u32 * 12, input.start_date)
    }
}

// ============================================================================
// Loan payment
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPaymentInput {
    pub amount: f64,
    pub rate: f64,
    pub months: f64,
    pub start_date: NaiveDate,
}

impl Validate for LoanPaymentInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("amount", self.amount, 100.0, 10_000_000.0)
            .range("rate", self.rate, 0.01, 50.0)
            .whole("months", self.months, 1.0, 600.0);
        v.finish()
    }
}

pub struct LoanPayment;

impl Calculator for LoanPayment {
    const KIND: CalculatorKind = CalculatorKind::LoanPayment;
    type Input = LoanPaymentInput;
    type Output = ScheduledLoanResult;

    fn calculate(input: &LoanPaymentInput, _: &Assumptions) -> ScheduledLoanResult {
        ScheduledLoanResult::compute(input.amount, input.rate, input.months as u32, input.start_date)
    }
}

// ============================================================================
// Loan comparison
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanComparisonInput {
    pub amount_a: f64,
    pub rate_a: f64,
    pub months_a: f64,
    #[serde(default)]
    pub fees_a: f64,
    pub amount_b: f64,
    pub rate_b: f64,
    pub months_b: f64,
    #[serde(default)]
    pub fees_b: f64,
}

impl Validate for LoanComparisonInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("amountA", self.amount_a, 100.0, 10_000_000.0)
            .range("rateA", self.rate_a, 0.01, 50.0)
            .whole("monthsA", self.months_a, 1.0, 600.0)
            .range("feesA", self.fees_a, 0.0, 1_000_000.0)
            .range("amountB", self.amount_b, 100.0, 10_000_000.0)
            .range("rateB", self.rate_b, 0.01, 50.0)
            .whole("monthsB", self.months_b, 1.0, 600.0)
            .range("feesB", self.fees_b, 0.0, 1_000_000.0);
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSide {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    /// Total payment plus up-front fees
    pub total_cost: f64,
}

impl LoanSide {
    fn compute(principal: f64, annual_rate_pct: f64, months: u32, fees: f64) -> Self {
        let payment = solve_for_payment(principal, annual_rate_pct, months);
        let total = payment * months as f64;
        Self {
            monthly_payment: round2(payment),
            total_payment: round2(total),
            total_interest: round2(total - principal),
            total_cost: round2(total + fees),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cheaper {
    A,
    B,
    #[serde(rename = "equal")]
    Equal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanComparisonResult {
    pub loan_a: LoanSide,
    pub loan_b: LoanSide,
    pub monthly_savings: f64,
    pub total_savings: f64,
    pub cheaper_loan: Cheaper,
}

pub struct LoanComparison;

impl Calculator for LoanComparison {
    const KIND: CalculatorKind = CalculatorKind::LoanComparison;
    type Input = LoanComparisonInput;
    type Output = LoanComparisonResult;

    fn calculate(input: &LoanComparisonInput, _: &Assumptions) -> LoanComparisonResult {
        let loan_a = LoanSide::compute(input.amount_a, input.rate_a, input.months_a as u32, input.fees_a);
        let loan_b = LoanSide::compute(input.amount_b, input.rate_b, input.months_b as u32, input.fees_b);

        let cheaper_loan = if loan_a.total_cost < loan_b.total_cost {
            Cheaper::A
        } else if loan_b.total_cost < loan_a.total_cost {
            Cheaper::B
        } else {
            Cheaper::Equal
        };

        LoanComparisonResult {
            monthly_savings: round2((loan_a.monthly_payment - loan_b.monthly_payment).abs()),
            total_savings: round2((loan_a.total_cost - loan_b.total_cost).abs()),
            cheaper_loan,
            loan_a,
            loan_b,
        }
    }
}

// ============================================================================
// Mortgage refinance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageRefinanceInput {
    pub current_balance: f64,
    pub current_rate: f64,
    pub remaining_months: f64,
    pub new_rate: f64,
    pub new_term_months: f64,
    pub closing_costs: f64,
}

impl Validate for MortgageRefinanceInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("currentBalance", self.current_balance, 1_000.0, 10_000_000.0)
            .range("currentRate", self.current_rate, 0.01, 30.0)
            .whole("remainingMonths", self.remaining_months, 1.0, 600.0)
            .range("newRate", self.new_rate, 0.01, 30.0)
            .whole("newTermMonths", self.new_term_months, 12.0, 600.0)
            .range("closingCosts", self.closing_costs, 0.0, 1_000_000.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageRefinanceResult {
    pub current_payment: f64,
    pub new_payment: f64,
    /// Negative when the new payment is higher
    pub monthly_savings: f64,
    /// Months of savings needed to recover closing costs
    pub break_even: Horizon,
    pub current_total_interest: f64,
    pub new_total_interest: f64,
    /// Interest saved over both terms, net of closing costs
    pub lifetime_savings: f64,
}

pub struct MortgageRefinance;

impl Calculator for MortgageRefinance {
    const KIND: CalculatorKind = CalculatorKind::MortgageRefinance;
    type Input = MortgageRefinanceInput;
    type Output = MortgageRefinanceResult;

    fn calculate(input: &MortgageRefinanceInput, assumptions: &Assumptions) -> MortgageRefinanceResult {
        let remaining = input.remaining_months as u32;
        let new_term = input.new_term_months as u32;

        let current_payment = solve_for_payment(input.current_balance, input.current_rate, remaining);
        let new_payment = solve_for_payment(input.current_balance, input.new_rate, new_term);
        let monthly_savings = current_payment - new_payment;

        let current_interest = total_interest(input.current_balance, current_payment, remaining);
        let new_interest = total_interest(input.current_balance, new_payment, new_term);

        let break_even = if monthly_savings > 0.0 {
            Horizon::ceil_within(
                input.closing_costs / monthly_savings,
                assumptions.limits.payoff_months,
            )
        } else {
            Horizon::Never
        };

        MortgageRefinanceResult {
            current_payment: round2(current_payment),
            new_payment: round2(new_payment),
            monthly_savings: round2(monthly_savings),
            break_even,
            current_total_interest: round2(current_interest),
            new_total_interest: round2(new_interest),
            lifetime_savings: round2(current_interest - new_interest - input.closing_costs),
        }
    }
}

// ============================================================================
// HELOC
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelocInput {
    pub draw_amount: f64,
    pub annual_rate: f64,
    pub repayment_years: f64,
}

impl Validate for HelocInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("drawAmount", self.draw_amount)
            .range("annualRate", self.annual_rate, 0.01, 30.0)
            .whole("repaymentYears", self.repayment_years, 1.0, 30.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelocResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub draw_amount: f64,
}

/// Repayment phase of a home equity line of credit
pub struct Heloc;

impl Calculator for Heloc {
    const KIND: CalculatorKind = CalculatorKind::HelocPayment;
    type Input = HelocInput;
    type Output = HelocResult;

    fn calculate(input: &HelocInput, _: &Assumptions) -> HelocResult {
        let summary =
            LoanSummary::compute(input.draw_amount, input.annual_rate, input.repayment_years as u32 * 12);
        HelocResult {
            monthly_payment: summary.monthly_payment,
            total_interest: summary.total_interest,
            total_paid: summary.total_payment,
            draw_amount: round2(input.draw_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_mortgage_thirty_years() {
        let input = MortgageInput {
            amount: 300_000.0,
            rate: 4.5,
            years: 30.0,
            start_date: start(),
        };
        let result = Mortgage::run(&input, &Assumptions::default()).unwrap();

        assert_eq!(result.monthly_payment, 1520.06);
        assert_abs_diff_eq!(result.total_interest, 247_220.71, epsilon = 1.0);
        assert_eq!(result.schedule.len(), 360);
        assert_eq!(result.schedule.last().unwrap().balance, 0.0);
        assert_eq!(result.schedule[0].date_label(), "Feb 2025");

        let principal: f64 = result.schedule.iter().map(|r| r.principal_paid).sum();
        assert_abs_diff_eq!(principal, 300_000.0, epsilon = 2.0);
    }

    #[test]
    fn test_mortgage_validation() {
        let input = MortgageInput {
            amount: 500.0,
            rate: 4.5,
            years: 51.0,
            start_date: start(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.message_for("amount"), Some("must be at least 1000"));
        assert_eq!(errors.message_for("years"), Some("must be at most 50"));
        assert!(errors.message_for("rate").is_none());
    }

    #[test]
    fn test_loan_payment_months() {
        let input = LoanPaymentInput {
            amount: 12_000.0,
            rate: 6.0,
            months: 48.0,
            start_date: start(),
        };
        let result = LoanPayment::calculate(&input, &Assumptions::default());
        assert_eq!(result.schedule.len(), 48);
        assert_abs_diff_eq!(result.monthly_payment, 281.82, epsilon = 0.01);
    }

    #[test]
    fn test_comparison_picks_lower_total_cost() {
        let input = LoanComparisonInput {
            amount_a: 20_000.0,
            rate_a: 7.0,
            months_a: 60.0,
            fees_a: 0.0,
            amount_b: 20_000.0,
            rate_b: 6.0,
            months_b: 60.0,
            fees_b: 1_500.0,
        };
        let result = LoanComparison::calculate(&input, &Assumptions::default());

        // B's lower rate saves ~560 in interest, less than its 1,500 fee
        assert_eq!(result.cheaper_loan, Cheaper::A);
        assert_abs_diff_eq!(
            result.total_savings,
            (result.loan_a.total_cost - result.loan_b.total_cost).abs(),
            epsilon = 0.01
        );
        assert!(result.monthly_savings > 0.0);
    }

    #[test]
    fn test_comparison_equal() {
        let input = LoanComparisonInput {
            amount_a: 10_000.0,
            rate_a: 5.0,
            months_a: 36.0,
            fees_a: 100.0,
            amount_b: 10_000.0,
            rate_b: 5.0,
            months_b: 36.0,
            fees_b: 100.0,
        };
        let result = LoanComparison::calculate(&input, &Assumptions::default());
        assert_eq!(result.cheaper_loan, Cheaper::Equal);
        assert_eq!(result.total_savings, 0.0);
    }

    #[test]
    fn test_refinance_break_even() {
        let input = MortgageRefinanceInput {
            current_balance: 250_000.0,
            current_rate: 7.0,
            remaining_months: 300.0,
            new_rate: 5.5,
            new_term_months: 300.0,
            closing_costs: 4_000.0,
        };
        let result = MortgageRefinance::calculate(&input, &Assumptions::default());

        assert!(result.monthly_savings > 0.0);
        let months = result.break_even.finite().unwrap();
        assert_eq!(months, (4_000.0 / (result.current_payment - result.new_payment)).ceil() as u32);
        assert!(result.lifetime_savings > 0.0);
    }

    #[test]
    fn test_refinance_higher_payment_never_breaks_even() {
        let input = MortgageRefinanceInput {
            current_balance: 200_000.0,
            current_rate: 4.0,
            remaining_months: 240.0,
            new_rate: 6.0,
            new_term_months: 240.0,
            closing_costs: 3_000.0,
        };
        let result = MortgageRefinance::calculate(&input, &Assumptions::default());
        assert!(result.monthly_savings < 0.0);
        assert_eq!(result.break_even, Horizon::Never);
    }

    #[test]
    fn test_refinance_negligible_savings_never_breaks_even() {
        // a fraction of a cent a month recovers the closing costs only after centuries
        let input = MortgageRefinanceInput {
            current_balance: 200_000.0,
            current_rate: 6.0,
            remaining_months: 360.0,
            new_rate: 5.9999999,
            new_term_months: 360.0,
            closing_costs: 5_000.0,
        };
        let result = MortgageRefinance::calculate(&input, &Assumptions::default());
        assert_eq!(result.break_even, Horizon::Never);
    }

    #[test]
    fn test_heloc() {
        let input = HelocInput {
            draw_amount: 50_000.0,
            annual_rate: 8.5,
            repayment_years: 10.0,
        };
        let result = Heloc::run(&input, &Assumptions::default()).unwrap();
        assert_abs_diff_eq!(result.monthly_payment, 619.93, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_paid - result.total_interest, 50_000.0, epsilon = 0.011);
    }
}
