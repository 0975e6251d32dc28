//! Everyday money: budget split, savings goal, net worth and emergency fund

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ValidationErrors;
use crate::math::{monthly_rate, round, round2, solve_for_contribution};
use crate::simulation::{months_to_goal, Horizon};
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};

// ============================================================================
// Budget
// ============================================================================

fn default_needs() -> f64 {
    50.0
}

fn default_wants() -> f64 {
    30.0
}

fn default_savings() -> f64 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub monthly_income: f64,
    #[serde(default = "default_needs")]
    pub needs_percent: f64,
    #[serde(default = "default_wants")]
    pub wants_percent: f64,
    #[serde(default = "default_savings")]
    pub savings_percent: f64,
}

impl Validate for BudgetInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("monthlyIncome", self.monthly_income)
            .range("needsPercent", self.needs_percent, 0.0, 100.0)
            .range("wantsPercent", self.wants_percent, 0.0, 100.0)
            .range("savingsPercent", self.savings_percent, 0.0, 100.0)
            .check(
                "needsPercent",
                self.needs_percent + self.wants_percent + self.savings_percent > 0.0,
                "percentages must not all be zero",
            );
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetShare {
    pub amount: f64,
    /// Share of income after normalizing to 100%, 1 decimal
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub needs: BudgetShare,
    pub wants: BudgetShare,
    pub savings: BudgetShare,
    pub total_income: f64,
}

/// 50/30/20 style split; the three percentages are rescaled to sum to 100
pub struct Budget;

impl Calculator for Budget {
    const KIND: CalculatorKind = CalculatorKind::Budget;
    type Input = BudgetInput;
    type Output = BudgetResult;

    fn calculate(input: &BudgetInput, _: &Assumptions) -> BudgetResult {
        let total = input.needs_percent + input.wants_percent + input.savings_percent;
        let share = |pct: f64| {
            let normalized = pct / total * 100.0;
            BudgetShare {
                amount: round2(input.monthly_income * normalized / 100.0),
                percent: round(normalized, 1),
            }
        };

        BudgetResult {
            needs: share(input.needs_percent),
            wants: share(input.wants_percent),
            savings: share(input.savings_percent),
            total_income: input.monthly_income,
        }
    }
}

// ============================================================================
// Savings goal
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalInput {
    pub goal_amount: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
}

impl Validate for SavingsGoalInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("goalAmount", self.goal_amount)
            .at_least("currentSavings", self.current_savings, 0.0)
            .at_least("monthlyContribution", self.monthly_contribution, 0.0)
            .range("annualReturn", self.annual_return, 0.0, 30.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalResult {
    pub months: Horizon,
    /// Monthly contribution that reaches the goal in exactly `months`
    pub monthly_required: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

pub struct SavingsGoal;

impl Calculator for SavingsGoal {
    const KIND: CalculatorKind = CalculatorKind::SavingsGoal;
    type Input = SavingsGoalInput;
    type Output = SavingsGoalResult;

    fn calculate(input: &SavingsGoalInput, assumptions: &Assumptions) -> SavingsGoalResult {
        let already_there = input.current_savings >= input.goal_amount;
        let nothing_grows = input.monthly_contribution <= 0.0 && monthly_rate(input.annual_return) <= 0.0;
        if nothing_grows && !already_there {
            return SavingsGoalResult {
                months: Horizon::Never,
                monthly_required: 0.0,
                total_contributions: 0.0,
                total_interest: 0.0,
            };
        }

        let progress = months_to_goal(
            input.current_savings,
            input.annual_return,
            input.monthly_contribution,
            input.goal_amount,
            assumptions.limits.goal_months,
        );
        let required = solve_for_contribution(
            input.goal_amount,
            input.current_savings,
            input.annual_return,
            progress.months as f64 / 12.0,
            12,
        );

        SavingsGoalResult {
            months: if progress.reached {
                Horizon::Finite(progress.months)
            } else {
                Horizon::Never
            },
            monthly_required: round2(required),
            total_contributions: round2(
                input.current_savings + input.monthly_contribution * progress.months as f64,
            ),
            total_interest: round2(progress.interest),
        }
    }
}

// ============================================================================
// Net worth
// ============================================================================

/// A named asset or liability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthInput {
    pub assets: Vec<LineItem>,
    #[serde(default)]
    pub liabilities: Vec<LineItem>,
}

impl Validate for NetWorthInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.non_empty_list("assets", &self.assets, "add at least one asset");
        for (list, items) in [("assets", &self.assets), ("liabilities", &self.liabilities)] {
            for (i, item) in items.iter().enumerate() {
                v.non_empty(&format!("{}[{}].name", list, i), &item.name)
                    .at_least(&format!("{}[{}].value", list, i), item.value, 0.0);
            }
        }
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthResult {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

pub struct NetWorth;

impl Calculator for NetWorth {
    const KIND: CalculatorKind = CalculatorKind::NetWorth;
    type Input = NetWorthInput;
    type Output = NetWorthResult;

    fn calculate(input: &NetWorthInput, _: &Assumptions) -> NetWorthResult {
        let assets: f64 = input.assets.iter().map(|a| a.value).sum();
        let liabilities: f64 = input.liabilities.iter().map(|l| l.value).sum();
        NetWorthResult {
            total_assets: round2(assets),
            total_liabilities: round2(liabilities),
            net_worth: round2(assets - liabilities),
        }
    }
}

// ============================================================================
// Emergency fund
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundInput {
    pub monthly_expenses: f64,
    pub months_coverage: f64,
    pub current_savings: f64,
    /// Amount set aside toward the fund each month
    pub monthly_savings_rate: f64,
}

impl Validate for EmergencyFundInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("monthlyExpenses", self.monthly_expenses)
            .whole("monthsCoverage", self.months_coverage, 1.0, 24.0)
            .at_least("currentSavings", self.current_savings, 0.0)
            .at_least("monthlySavingsRate", self.monthly_savings_rate, 0.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundResult {
    pub target_fund: f64,
    pub current_shortfall: f64,
    /// Portion of the target already saved, capped at 100
    pub funded_percent: f64,
    pub months_to_goal: Horizon,
    pub monthly_expenses: f64,
}

pub struct EmergencyFund;

impl Calculator for EmergencyFund {
    const KIND: CalculatorKind = CalculatorKind::EmergencyFund;
    type Input = EmergencyFundInput;
    type Output = EmergencyFundResult;

    fn calculate(input: &EmergencyFundInput, assumptions: &Assumptions) -> EmergencyFundResult {
        let target = input.monthly_expenses * input.months_coverage;
        let shortfall = (target - input.current_savings).max(0.0);

        let months_to_goal = if shortfall <= 0.0 {
            Horizon::Finite(0)
        } else if input.monthly_savings_rate > 0.0 {
            Horizon::ceil_within(
                shortfall / input.monthly_savings_rate,
                assumptions.limits.goal_months,
            )
        } else {
            Horizon::Never
        };

        EmergencyFundResult {
            target_fund: round2(target),
            current_shortfall: round2(shortfall),
            funded_percent: round((input.current_savings / target * 100.0).min(100.0), 1),
            months_to_goal,
            monthly_expenses: input.monthly_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_budget_default_split() {
        let input: BudgetInput = serde_json::from_str(r#"{"monthlyIncome": 5000}"#).unwrap();
        let result = Budget::run(&input, &Assumptions::default()).unwrap();

        assert_eq!(result.needs.amount, 2_500.0);
        assert_eq!(result.wants.amount, 1_500.0);
        assert_eq!(result.savings.amount, 1_000.0);
        assert_eq!(result.savings.percent, 20.0);
    }

    #[test]
    fn test_budget_normalizes_percentages() {
        let input = BudgetInput {
            monthly_income: 4_000.0,
            needs_percent: 60.0,
            wants_percent: 60.0,
            savings_percent: 0.0,
        };
        let result = Budget::calculate(&input, &Assumptions::default());
        assert_eq!(result.needs.percent, 50.0);
        assert_eq!(result.needs.amount, 2_000.0);
        assert_eq!(result.savings.amount, 0.0);
    }

    #[test]
    fn test_budget_rejects_all_zero() {
        let input = BudgetInput {
            monthly_income: 4_000.0,
            needs_percent: 0.0,
            wants_percent: 0.0,
            savings_percent: 0.0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_savings_goal_months() {
        let input = SavingsGoalInput {
            goal_amount: 10_000.0,
            current_savings: 1_000.0,
            monthly_contribution: 500.0,
            annual_return: 0.0,
        };
        let result = SavingsGoal::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(result.months, Horizon::Finite(18));
        assert_eq!(result.monthly_required, 500.0);
        assert_eq!(result.total_contributions, 10_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_savings_goal_with_interest() {
        let input = SavingsGoalInput {
            goal_amount: 20_000.0,
            current_savings: 2_000.0,
            monthly_contribution: 400.0,
            annual_return: 5.0,
        };
        let result = SavingsGoal::calculate(&input, &Assumptions::default());
        let months = result.months.finite().unwrap();
        assert!(months < 45);
        assert!(result.total_interest > 0.0);
        // the required payment for the rounded-up horizon never exceeds the actual one
        assert!(result.monthly_required <= 400.0);
    }

    #[test]
    fn test_savings_goal_never() {
        let input = SavingsGoalInput {
            goal_amount: 10_000.0,
            current_savings: 1_000.0,
            monthly_contribution: 0.0,
            annual_return: 0.0,
        };
        let result = SavingsGoal::calculate(&input, &Assumptions::default());
        assert_eq!(result.months, Horizon::Never);
    }

    #[test]
    fn test_savings_goal_already_met() {
        let input = SavingsGoalInput {
            goal_amount: 5_000.0,
            current_savings: 6_000.0,
            monthly_contribution: 0.0,
            annual_return: 0.0,
        };
        let result = SavingsGoal::calculate(&input, &Assumptions::default());
        assert_eq!(result.months, Horizon::Finite(0));
        assert_eq!(result.monthly_required, 0.0);
    }

    #[test]
    fn test_net_worth() {
        let input: NetWorthInput = serde_json::from_str(
            r#"{
                "assets": [{"name": "Checking", "value": 5200.5}, {"name": "House", "value": 350000}],
                "liabilities": [{"name": "Mortgage", "value": 280000}]
            }"#,
        )
        .unwrap();
        let result = NetWorth::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(result.total_assets, 355_200.5);
        assert_eq!(result.net_worth, 75_200.5);
    }

    #[test]
    fn test_net_worth_requires_asset() {
        let input = NetWorthInput {
            assets: Vec::new(),
            liabilities: vec![LineItem {
                name: "Card".to_string(),
                value: -10.0,
            }],
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.message_for("assets"), Some("add at least one asset"));
        assert_eq!(errors.message_for("liabilities[0].value"), Some("must be at least 0"));
    }

    #[test]
    fn test_emergency_fund() {
        let input = EmergencyFundInput {
            monthly_expenses: 3_000.0,
            months_coverage: 6.0,
            current_savings: 5_000.0,
            monthly_savings_rate: 600.0,
        };
        let result = EmergencyFund::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(result.target_fund, 18_000.0);
        assert_eq!(result.current_shortfall, 13_000.0);
        assert_eq!(result.months_to_goal, Horizon::Finite(22));
        assert_abs_diff_eq!(result.funded_percent, 27.8, epsilon = 1e-9);
    }

    #[test]
    fn test_emergency_fund_not_saving() {
        let input = EmergencyFundInput {
            monthly_expenses: 3_000.0,
            months_coverage: 3.0,
            current_savings: 0.0,
            monthly_savings_rate: 0.0,
        };
        let result = EmergencyFund::calculate(&input, &Assumptions::default());
        assert_eq!(result.months_to_goal, Horizon::Never);

        let funded = EmergencyFund::calculate(
            &EmergencyFundInput {
                current_savings: 20_000.0,
                ..input
            },
            &Assumptions::default(),
        );
        assert_eq!(funded.months_to_goal, Horizon::Finite(0));
        assert_eq!(funded.funded_percent, 100.0);
    }

    #[test]
    fn test_emergency_fund_trickle_never_arrives() {
        let input = EmergencyFundInput {
            monthly_expenses: 3_000.0,
            months_coverage: 6.0,
            current_savings: 0.0,
            monthly_savings_rate: 0.01,
        };
        let result = EmergencyFund::run(&input, &Assumptions::default()).unwrap();
        assert_eq!(result.months_to_goal, Horizon::Never);

        // 18000 / 15 = 1200 months sits exactly on the limit
        let slow = EmergencyFund::calculate(
            &EmergencyFundInput {
                monthly_savings_rate: 15.0,
                ..input
            },
            &Assumptions::default(),
        );
        assert_eq!(slow.months_to_goal, Horizon::Finite(1200));
    }

    #[test]
    fn test_emergency_fund_rejects_partial_months() {
        let input = EmergencyFundInput {
            monthly_expenses: 3_000.0,
            months_coverage: 4.5,
            current_savings: 0.0,
            monthly_savings_rate: 100.0,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.message_for("monthsCoverage"), Some("must be a whole number"));
    }
}
