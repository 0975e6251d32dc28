//! Life insurance needs estimate

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ValidationErrors;
use crate::math::round2;
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceInput {
    pub annual_income: f64,
    pub years_to_replace: f64,
    #[serde(default)]
    pub total_debt: f64,
    #[serde(default)]
    pub children_education_cost: f64,
    #[serde(default)]
    pub final_expenses: f64,
    #[serde(default)]
    pub existing_coverage: f64,
}

impl Validate for LifeInsuranceInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("annualIncome", self.annual_income)
            .whole("yearsToReplace", self.years_to_replace, 1.0, 50.0)
            .at_least("totalDebt", self.total_debt, 0.0)
            .at_least("childrenEducationCost", self.children_education_cost, 0.0)
            .at_least("finalExpenses", self.final_expenses, 0.0)
            .at_least("existingCoverage", self.existing_coverage, 0.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceResult {
    pub income_replacement: f64,
    pub debt_coverage: f64,
    pub education_fund: f64,
    pub final_expenses: f64,
    pub total_need: f64,
    pub existing_coverage: f64,
    /// Never negative; over-insured households need nothing more
    pub additional_needed: f64,
}

/// Needs-based coverage: income replacement plus debts, education and final expenses
pub struct LifeInsurance;

impl Calculator for LifeInsurance {
    const KIND: CalculatorKind = CalculatorKind::LifeInsurance;
    type Input = LifeInsuranceInput;
    type Output = LifeInsuranceResult;

    fn calculate(input: &LifeInsuranceInput, _: &Assumptions) -> LifeInsuranceResult {
        let income_replacement = input.annual_income * input.years_to_replace;
        let total_need = income_replacement
            + input.total_debt
            + input.children_education_cost
            + input.final_expenses;

        LifeInsuranceResult {
            income_replacement: round2(income_replacement),
            debt_coverage: round2(input.total_debt),
            education_fund: round2(input.children_education_cost),
            final_expenses: round2(input.final_expenses),
            total_need: round2(total_need),
            existing_coverage: round2(input.existing_coverage),
            additional_needed: round2((total_need - input.existing_coverage).max(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household() -> LifeInsuranceInput {
        LifeInsuranceInput {
            annual_income: 80_000.0,
            years_to_replace: 10.0,
            total_debt: 250_000.0,
            children_education_cost: 100_000.0,
            final_expenses: 15_000.0,
            existing_coverage: 200_000.0,
        }
    }

    #[test]
    fn test_total_need() {
        let result = LifeInsurance::run(&household(), &Assumptions::default()).unwrap();
        assert_eq!(result.income_replacement, 800_000.0);
        assert_eq!(result.total_need, 1_165_000.0);
        assert_eq!(result.additional_needed, 965_000.0);
    }

    #[test]
    fn test_existing_coverage_exceeds_need() {
        let mut input = household();
        input.existing_coverage = 2_000_000.0;
        let result = LifeInsurance::calculate(&input, &Assumptions::default());
        assert_eq!(result.additional_needed, 0.0);
    }

    #[test]
    fn test_rejects_zero_years() {
        let mut input = household();
        input.years_to_replace = 0.0;
        let err = input.validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "yearsToReplace");
    }
}
