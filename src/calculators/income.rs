//! Pay and tax: salary/hourly conversion, raises, federal income tax and freelance rates

use serde::{Deserialize, Serialize};

use crate::assumptions::{Assumptions, TaxBracket};
use crate::error::ValidationErrors;
use crate::math::{format_number, round2};
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};

// ============================================================================
// Salary / hourly
// ============================================================================

/// Which figure `amount` holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMode {
    Salary,
    Hourly,
}

fn default_hours() -> f64 {
    40.0
}

fn default_weeks() -> f64 {
    52.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryHourlyInput {
    pub mode: PayMode,
    pub amount: f64,
    #[serde(default = "default_hours")]
    pub hours_per_week: f64,
    #[serde(default = "default_weeks")]
    pub weeks_per_year: f64,
}

impl Validate for SalaryHourlyInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("amount", self.amount)
            .range("hoursPerWeek", self.hours_per_week, 1.0, 168.0)
            .range("weeksPerYear", self.weeks_per_year, 1.0, 52.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryHourlyResult {
    pub annual_salary: f64,
    pub monthly_salary: f64,
    pub biweekly_salary: f64,
    pub weekly_salary: f64,
    /// Five working days a week
    pub daily_salary: f64,
    pub hourly_rate: f64,
}

pub struct SalaryHourly;

impl Calculator for SalaryHourly {
    const KIND: CalculatorKind = CalculatorKind::SalaryHourly;
    type Input = SalaryHourlyInput;
    type Output = SalaryHourlyResult;

    fn calculate(input: &SalaryHourlyInput, _: &Assumptions) -> SalaryHourlyResult {
        let hours_per_year = input.hours_per_week * input.weeks_per_year;
        let annual = match input.mode {
            PayMode::Salary => input.amount,
            PayMode::Hourly => input.amount * hours_per_year,
        };

        SalaryHourlyResult {
            annual_salary: round2(annual),
            monthly_salary: round2(annual / 12.0),
            biweekly_salary: round2(annual / 26.0),
            weekly_salary: round2(annual / input.weeks_per_year),
            daily_salary: round2(annual / (input.weeks_per_year * 5.0)),
            hourly_rate: round2(annual / hours_per_year),
        }
    }
}

// ============================================================================
// Salary raise
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRaiseInput {
    pub current_salary: f64,
    pub raise_percent: f64,
}

impl Validate for SalaryRaiseInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("currentSalary", self.current_salary)
            .range("raisePercent", self.raise_percent, 0.0, 200.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRaiseResult {
    pub old_salary: f64,
    pub new_salary: f64,
    pub raise_amount: f64,
    pub raise_percent: f64,
    pub monthly_increase: f64,
    pub new_monthly: f64,
}

pub struct SalaryRaise;

impl Calculator for SalaryRaise {
    const KIND: CalculatorKind = CalculatorKind::SalaryRaise;
    type Input = SalaryRaiseInput;
    type Output = SalaryRaiseResult;

    fn calculate(input: &SalaryRaiseInput, _: &Assumptions) -> SalaryRaiseResult {
        let raise = input.current_salary * input.raise_percent / 100.0;
        let new_salary = input.current_salary + raise;

        SalaryRaiseResult {
            old_salary: round2(input.current_salary),
            new_salary: round2(new_salary),
            raise_amount: round2(raise),
            raise_percent: round2(input.raise_percent),
            monthly_increase: round2(raise / 12.0),
            new_monthly: round2(new_salary / 12.0),
        }
    }
}

// ============================================================================
// Income tax
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxInput {
    pub gross_income: f64,
    /// Itemized deductions; 0 takes the standard deduction
    #[serde(default)]
    pub deductions: f64,
}

impl Validate for IncomeTaxInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("grossIncome", self.gross_income)
            .at_least("deductions", self.deductions, 0.0);
        v.finish()
    }
}

/// Tax owed within one marginal bracket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracketRow {
    /// e.g. `$11,925 – $48,475` or `$626,350+`
    pub bracket: String,
    pub rate: f64,
    pub taxable_in_bracket: f64,
    pub tax_in_bracket: f64,
}

impl TaxBracketRow {
    fn label(bracket: &TaxBracket) -> String {
        match bracket.max {
            Some(max) => format!("${} – ${}", format_number(bracket.min, 0), format_number(max, 0)),
            None => format!("${}+", format_number(bracket.min, 0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxResult {
    pub gross_income: f64,
    /// Deduction actually applied (itemized or standard)
    pub deduction: f64,
    pub taxable_income: f64,
    pub total_federal_tax: f64,
    /// Total tax over gross income, percent
    pub effective_rate: f64,
    /// Rate of the highest bracket reached, percent
    pub marginal_rate: f64,
    pub after_tax_income: f64,
    pub monthly_after_tax: f64,
    pub brackets: Vec<TaxBracketRow>,
}

/// Progressive federal tax over the configured bracket table
pub struct IncomeTax;

impl Calculator for IncomeTax {
    const KIND: CalculatorKind = CalculatorKind::IncomeTax;
    type Input = IncomeTaxInput;
    type Output = IncomeTaxResult;

    fn calculate(input: &IncomeTaxInput, assumptions: &Assumptions) -> IncomeTaxResult {
        let table = &assumptions.tax;
        let deduction = if input.deductions > 0.0 {
            input.deductions
        } else {
            table.standard_deduction()
        };
        let taxable = (input.gross_income - deduction).max(0.0);

        let mut total_tax = 0.0;
        let mut marginal_rate = table.brackets().first().map(|b| b.rate).unwrap_or(0.0);
        let mut brackets = Vec::new();

        for bracket in table.brackets() {
            let in_bracket = bracket.taxable_amount(taxable);
            if in_bracket <= 0.0 {
                break;
            }
            let tax = in_bracket * bracket.rate / 100.0;
            total_tax += tax;
            marginal_rate = bracket.rate;
            brackets.push(TaxBracketRow {
                bracket: TaxBracketRow::label(bracket),
                rate: bracket.rate,
                taxable_in_bracket: round2(in_bracket),
                tax_in_bracket: round2(tax),
            });
        }

        let after_tax = input.gross_income - total_tax;
        IncomeTaxResult {
            gross_income: round2(input.gross_income),
            deduction: round2(deduction),
            taxable_income: round2(taxable),
            total_federal_tax: round2(total_tax),
            effective_rate: round2(total_tax / input.gross_income * 100.0),
            marginal_rate,
            after_tax_income: round2(after_tax),
            monthly_after_tax: round2(after_tax / 12.0),
            brackets,
        }
    }
}

// ============================================================================
// Freelance rate
// ============================================================================

fn default_billable_weeks() -> f64 {
    48.0
}

fn default_tax_rate() -> f64 {
    30.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelanceRateInput {
    /// Take-home income after expenses and tax
    pub desired_annual_income: f64,
    #[serde(default)]
    pub annual_expenses: f64,
    pub billable_hours_per_week: f64,
    #[serde(default = "default_billable_weeks")]
    pub weeks_per_year: f64,
    /// Combined tax rate on revenue, percent
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

impl Validate for FreelanceRateInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("desiredAnnualIncome", self.desired_annual_income)
            .at_least("annualExpenses", self.annual_expenses, 0.0)
            .range("billableHoursPerWeek", self.billable_hours_per_week, 1.0, 80.0)
            .range("weeksPerYear", self.weeks_per_year, 1.0, 52.0)
            .range("taxRate", self.tax_rate, 0.0, 60.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelanceRateResult {
    pub hourly_rate: f64,
    /// Eight billable hours
    pub daily_rate: f64,
    pub weekly_rate: f64,
    pub monthly_rate: f64,
    pub annual_revenue: f64,
    pub effective_hourly_after_expenses: f64,
    pub billable_hours_per_year: f64,
}

pub struct FreelanceRate;

impl Calculator for FreelanceRate {
    const KIND: CalculatorKind = CalculatorKind::FreelanceRate;
    type Input = FreelanceRateInput;
    type Output = FreelanceRateResult;

    fn calculate(input: &FreelanceRateInput, _: &Assumptions) -> FreelanceRateResult {
        let hours_per_year = input.billable_hours_per_week * input.weeks_per_year;
        let revenue =
            (input.desired_annual_income + input.annual_expenses) / (1.0 - input.tax_rate / 100.0);
        let hourly = revenue / hours_per_year;

        FreelanceRateResult {
            hourly_rate: round2(hourly),
            daily_rate: round2(hourly * 8.0),
            weekly_rate: round2(hourly * input.billable_hours_per_week),
            monthly_rate: round2(revenue / 12.0),
            annual_revenue: round2(revenue),
            effective_hourly_after_expenses: round2(input.desired_annual_income / hours_per_year),
            billable_hours_per_year: hours_per_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_salary_to_hourly() {
        let input = SalaryHourlyInput {
            mode: PayMode::Salary,
            amount: 52_000.0,
            hours_per_week: 40.0,
            weeks_per_year: 52.0,
        };
        let result = SalaryHourly::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(result.hourly_rate, 25.0);
        assert_eq!(result.weekly_salary, 1_000.0);
        assert_eq!(result.daily_salary, 200.0);
        assert_eq!(result.biweekly_salary, 2_000.0);
        assert_eq!(result.monthly_salary, 4_333.33);
    }

    #[test]
    fn test_hourly_to_salary() {
        let input: SalaryHourlyInput =
            serde_json::from_str(r#"{"mode": "hourly", "amount": 30}"#).unwrap();
        let result = SalaryHourly::calculate(&input, &Assumptions::default());
        assert_eq!(result.annual_salary, 62_400.0);
        assert_eq!(result.hourly_rate, 30.0);
    }

    #[test]
    fn test_salary_raise() {
        let input = SalaryRaiseInput {
            current_salary: 60_000.0,
            raise_percent: 5.0,
        };
        let result = SalaryRaise::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(result.raise_amount, 3_000.0);
        assert_eq!(result.new_salary, 63_000.0);
        assert_eq!(result.monthly_increase, 250.0);
        assert_eq!(result.new_monthly, 5_250.0);
    }

    #[test]
    fn test_income_tax_standard_deduction() {
        let input = IncomeTaxInput {
            gross_income: 75_000.0,
            deductions: 0.0,
        };
        let result = IncomeTax::run(&input, &Assumptions::default()).unwrap();

        // 60,000 taxable: 1,192.50 + 4,386.00 + 2,535.50
        assert_eq!(result.deduction, 15_000.0);
        assert_eq!(result.taxable_income, 60_000.0);
        assert_abs_diff_eq!(result.total_federal_tax, 8_114.0, epsilon = 1e-9);
        assert_eq!(result.marginal_rate, 22.0);
        assert_eq!(result.brackets.len(), 3);
        assert_eq!(result.brackets[0].bracket, "$0 – $11,925");
        assert_eq!(result.brackets[1].bracket, "$11,925 – $48,475");
        assert_abs_diff_eq!(result.effective_rate, 10.82, epsilon = 1e-9);
        assert_abs_diff_eq!(result.after_tax_income, 66_886.0, epsilon = 1e-9);
    }

    #[test]
    fn test_income_tax_top_bracket_label() {
        let input = IncomeTaxInput {
            gross_income: 1_000_000.0,
            deductions: 50_000.0,
        };
        let result = IncomeTax::calculate(&input, &Assumptions::default());
        assert_eq!(result.deduction, 50_000.0);
        assert_eq!(result.brackets.len(), 7);
        assert_eq!(result.brackets[6].bracket, "$626,350+");
        assert_eq!(result.marginal_rate, 37.0);
    }

    #[test]
    fn test_income_below_deduction() {
        let input = IncomeTaxInput {
            gross_income: 10_000.0,
            deductions: 0.0,
        };
        let result = IncomeTax::calculate(&input, &Assumptions::default());
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.total_federal_tax, 0.0);
        assert!(result.brackets.is_empty());
        assert_eq!(result.marginal_rate, 10.0);
    }

    #[test]
    fn test_freelance_rate() {
        let input: FreelanceRateInput = serde_json::from_str(
            r#"{"desiredAnnualIncome": 84000, "annualExpenses": 0, "billableHoursPerWeek": 25}"#,
        )
        .unwrap();
        let result = FreelanceRate::run(&input, &Assumptions::default()).unwrap();

        // 84,000 / 0.7 = 120,000 over 1,200 billable hours
        assert_eq!(result.billable_hours_per_year, 1_200.0);
        assert_eq!(result.annual_revenue, 120_000.0);
        assert_eq!(result.hourly_rate, 100.0);
        assert_eq!(result.daily_rate, 800.0);
        assert_eq!(result.monthly_rate, 10_000.0);
        assert_eq!(result.effective_hourly_after_expenses, 70.0);
    }
}
