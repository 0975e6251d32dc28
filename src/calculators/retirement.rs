//! Long-horizon planning: retirement saving, retirement drawdown and college savings

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ValidationErrors;
use crate::math::{round2, solve_for_contribution};
use crate::simulation::{accumulate_years, simulate_drawdown};
use crate::validation::{Validate, Validator};

use super::investing::SavingsYear;
use super::{Calculator, CalculatorKind};

// ============================================================================
// Retirement savings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSavingsInput {
    pub current_age: f64,
    pub retirement_age: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    /// Yearly raise applied to the monthly contribution, percent
    #[serde(default)]
    pub annual_contribution_increase: f64,
}

impl Validate for RetirementSavingsInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.whole("currentAge", self.current_age, 16.0, 80.0)
            .whole("retirementAge", self.retirement_age, 30.0, 100.0)
            .check(
                "retirementAge",
                self.retirement_age > self.current_age,
                "must be greater than current age",
            )
            .at_least("currentSavings", self.current_savings, 0.0)
            .at_least("monthlyContribution", self.monthly_contribution, 0.0)
            .range("annualReturn", self.annual_return, 0.0, 50.0)
            .range("annualContributionIncrease", self.annual_contribution_increase, 0.0, 20.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSavingsResult {
    pub future_value: f64,
    /// Current savings plus every contribution
    pub total_contributions: f64,
    pub total_interest: f64,
    pub years_to_retirement: u32,
    pub schedule: Vec<SavingsYear>,
}

pub struct RetirementSavings;

impl Calculator for RetirementSavings {
    const KIND: CalculatorKind = CalculatorKind::RetirementSavings;
    type Input = RetirementSavingsInput;
    type Output = RetirementSavingsResult;

    fn calculate(input: &RetirementSavingsInput, _: &Assumptions) -> RetirementSavingsResult {
        let current_age = input.current_age as u32;
        let years = (input.retirement_age as u32).saturating_sub(current_age);
        let acc = accumulate_years(
            input.current_savings,
            input.annual_return,
            input.monthly_contribution,
            years,
            input.annual_contribution_increase,
        );

        RetirementSavingsResult {
            future_value: round2(acc.balance),
            total_contributions: round2(input.current_savings + acc.contributed),
            total_interest: round2(acc.interest),
            years_to_retirement: years,
            schedule: acc
                .years
                .iter()
                .map(|y| SavingsYear::from(y).at_age(current_age))
                .collect(),
        }
    }
}

// ============================================================================
// Retirement drawdown
// ============================================================================

fn default_inflation() -> f64 {
    2.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementDrawdownInput {
    pub current_age: f64,
    pub retirement_balance: f64,
    /// First-year withdrawal; later years rise with inflation
    pub annual_withdrawal: f64,
    pub annual_return: f64,
    #[serde(default = "default_inflation")]
    pub inflation_rate: f64,
}

impl Validate for RetirementDrawdownInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.whole("currentAge", self.current_age, 30.0, 100.0)
            .positive("retirementBalance", self.retirement_balance)
            .positive("annualWithdrawal", self.annual_withdrawal)
            .range("annualReturn", self.annual_return, 0.0, 30.0)
            .range("inflationRate", self.inflation_rate, 0.0, 15.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalYear {
    pub year: u32,
    pub age: u32,
    pub start_balance: f64,
    pub withdrawal: f64,
    pub interest: f64,
    pub end_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementDrawdownResult {
    /// Years simulated, counting a final partial year
    pub years_lasted: u32,
    /// None when the money outlasts the simulation horizon
    pub age_money_runs_out: Option<u32>,
    pub total_withdrawn: f64,
    pub total_interest_earned: f64,
    pub schedule: Vec<WithdrawalYear>,
}

pub struct RetirementDrawdown;

impl Calculator for RetirementDrawdown {
    const KIND: CalculatorKind = CalculatorKind::RetirementDrawdown;
    type Input = RetirementDrawdownInput;
    type Output = RetirementDrawdownResult;

    fn calculate(input: &RetirementDrawdownInput, assumptions: &Assumptions) -> RetirementDrawdownResult {
        let dd = simulate_drawdown(
            input.retirement_balance,
            input.annual_withdrawal,
            input.annual_return,
            input.inflation_rate,
            assumptions.limits.drawdown_years,
        );
        let years_lasted = dd.years.len() as u32;
        let current_age = input.current_age as u32;

        RetirementDrawdownResult {
            years_lasted,
            age_money_runs_out: dd.depleted.then_some(current_age + years_lasted),
            total_withdrawn: round2(dd.total_withdrawn),
            total_interest_earned: round2(dd.total_interest),
            schedule: dd
                .years
                .iter()
                .map(|y| WithdrawalYear {
                    year: y.year,
                    age: current_age + y.year,
                    start_balance: round2(y.start_balance),
                    withdrawal: round2(y.withdrawal),
                    interest: round2(y.interest),
                    end_balance: round2(y.end_balance.max(0.0)),
                })
                .collect(),
        }
    }
}

// ============================================================================
// College savings
// ============================================================================

fn default_cost_inflation() -> f64 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSavingsInput {
    pub child_age: f64,
    pub college_start_age: f64,
    /// Cost of one college year in today's dollars
    pub annual_college_cost: f64,
    pub years_in_college: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    #[serde(default = "default_cost_inflation")]
    pub college_cost_inflation: f64,
}

impl Validate for CollegeSavingsInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.whole("childAge", self.child_age, 0.0, 17.0)
            .whole("collegeStartAge", self.college_start_age, 16.0, 25.0)
            .check(
                "collegeStartAge",
                self.college_start_age > self.child_age,
                "must be greater than child age",
            )
            .positive("annualCollegeCost", self.annual_college_cost)
            .whole("yearsInCollege", self.years_in_college, 1.0, 8.0)
            .at_least("currentSavings", self.current_savings, 0.0)
            .at_least("monthlyContribution", self.monthly_contribution, 0.0)
            .range("annualReturn", self.annual_return, 0.0, 30.0)
            .range("collegeCostInflation", self.college_cost_inflation, 0.0, 15.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSavingsResult {
    /// Sum of every college year's cost, inflated to the year it is paid
    pub future_college_cost: f64,
    /// Monthly saving that exactly funds the future cost
    pub required_monthly_contribution: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub projected_balance: f64,
    pub shortfall: f64,
    pub schedule: Vec<SavingsYear>,
}

pub struct CollegeSavings;

impl Calculator for CollegeSavings {
    const KIND: CalculatorKind = CalculatorKind::CollegeSavings;
    type Input = CollegeSavingsInput;
    type Output = CollegeSavingsResult;

    fn calculate(input: &CollegeSavingsInput, _: &Assumptions) -> CollegeSavingsResult {
        let child_age = input.child_age as u32;
        let years_until = (input.college_start_age as u32).saturating_sub(child_age);
        let growth = 1.0 + input.college_cost_inflation / 100.0;

        let future_cost = round2(
            (0..input.years_in_college as u32)
                .map(|y| input.annual_college_cost * growth.powi((years_until + y) as i32))
                .sum(),
        );

        let acc = accumulate_years(
            input.current_savings,
            input.annual_return,
            input.monthly_contribution,
            years_until,
            0.0,
        );
        let required = solve_for_contribution(
            future_cost,
            input.current_savings,
            input.annual_return,
            years_until as f64,
            12,
        );

        CollegeSavingsResult {
            future_college_cost: future_cost,
            required_monthly_contribution: round2(required),
            total_contributions: round2(input.current_savings + acc.contributed),
            total_interest: round2(acc.interest),
            projected_balance: round2(acc.balance),
            shortfall: round2((future_cost - acc.balance).max(0.0)),
            schedule: acc
                .years
                .iter()
                .map(|y| SavingsYear::from(y).at_age(child_age))
                .collect(),
        }
    }
}
