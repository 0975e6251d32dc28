//! Catalog of every calculator: slug, display name, category and related links

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Grouping used on the calculator index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Loans,
    Investing,
    Budgeting,
    Income,
    Debt,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Loans,
        Category::Investing,
        Category::Budgeting,
        Category::Income,
        Category::Debt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Loans => "Loans & Mortgages",
            Category::Investing => "Saving & Investing",
            Category::Budgeting => "Money & Budgeting",
            Category::Income => "Income & Work",
            Category::Debt => "Insurance & Debt",
        }
    }
}

/// Every calculator the library provides; serializes as its slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Mortgage,
    LoanPayment,
    LoanComparison,
    LoanPayoff,
    MortgageRefinance,
    HomeAffordability,
    RentVsBuy,
    CreditCardPayoff,
    Apy,
    CompoundInterest,
    Roi,
    MillionaireCalculator,
    RetirementSavings,
    RetirementDrawdown,
    CollegeSavings,
    Budget,
    SavingsGoal,
    NetWorth,
    EmergencyFund,
    SalaryHourly,
    SalaryRaise,
    IncomeTax,
    FreelanceRate,
    LifeInsurance,
    HelocPayment,
    DebtConsolidation,
    DebtPayoffPlanner,
}

/// Static description of one calculator
#[derive(Debug)]
pub struct CalculatorInfo {
    pub kind: CalculatorKind,
    pub slug: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Output includes a row-by-row schedule or table
    pub has_schedule: bool,
    pub related: &'static [CalculatorKind],
}

use CalculatorKind as K;

/// Indexed by `CalculatorKind as usize`
static REGISTRY: [CalculatorInfo; 27] = [
    CalculatorInfo {
        kind: K::Mortgage,
        slug: "mortgage",
        name: "Mortgage Calculator",
        category: Category::Loans,
        description: "Calculate your monthly mortgage payment and generate a full amortization schedule.",
        has_schedule: true,
        related: &[K::HomeAffordability, K::MortgageRefinance, K::LoanPayment],
    },
    CalculatorInfo {
        kind: K::LoanPayment,
        slug: "loan-payment",
        name: "Loan Payment Calculator",
        category: Category::Loans,
        description: "Calculate monthly payments, total interest, and amortization for any loan.",
        has_schedule: true,
        related: &[K::Mortgage, K::LoanComparison, K::LoanPayoff],
    },
    CalculatorInfo {
        kind: K::LoanComparison,
        slug: "loan-comparison",
        name: "Loan Comparison Calculator",
        category: Category::Loans,
        description: "Compare two loans side by side to find the cheaper option.",
        has_schedule: false,
        related: &[K::LoanPayment, K::Mortgage, K::MortgageRefinance],
    },
    CalculatorInfo {
        kind: K::LoanPayoff,
        slug: "loan-payoff",
        name: "Loan Payoff Calculator",
        category: Category::Loans,
        description: "See how extra payments shorten your loan and save on interest.",
        has_schedule: true,
        related: &[K::LoanPayment, K::CreditCardPayoff, K::DebtPayoffPlanner],
    },
    CalculatorInfo {
        kind: K::MortgageRefinance,
        slug: "mortgage-refinance",
        name: "Mortgage Refinance Calculator",
        category: Category::Loans,
        description: "Find your break-even point and total savings from refinancing.",
        has_schedule: false,
        related: &[K::Mortgage, K::HomeAffordability, K::LoanComparison],
    },
    CalculatorInfo {
        kind: K::HomeAffordability,
        slug: "home-affordability",
        name: "Home Affordability Calculator",
        category: Category::Loans,
        description: "Find out how much house you can afford based on your income and debts.",
        has_schedule: false,
        related: &[K::Mortgage, K::RentVsBuy, K::MortgageRefinance],
    },
    CalculatorInfo {
        kind: K::RentVsBuy,
        slug: "rent-vs-buy",
        name: "Rent vs Buy Calculator",
        category: Category::Loans,
        description: "Compare the total cost of renting versus buying a home over time.",
        has_schedule: true,
        related: &[K::HomeAffordability, K::Mortgage, K::MortgageRefinance],
    },
    CalculatorInfo {
        kind: K::CreditCardPayoff,
        slug: "credit-card-payoff",
        name: "Credit Card Payoff Calculator",
        category: Category::Loans,
        description: "See how long it takes to pay off your credit card and how much interest you'll pay.",
        has_schedule: true,
        related: &[K::DebtPayoffPlanner, K::LoanPayoff, K::DebtConsolidation],
    },
    CalculatorInfo {
        kind: K::Apy,
        slug: "apy",
        name: "APY Calculator",
        category: Category::Investing,
        description: "Calculate Annual Percentage Yield and see how compounding grows your savings.",
        has_schedule: true,
        related: &[K::CompoundInterest, K::SavingsGoal, K::Roi],
    },
    CalculatorInfo {
        kind: K::CompoundInterest,
        slug: "compound-interest",
        name: "Compound Interest Calculator",
        category: Category::Investing,
        description: "See how your money grows with compound interest and regular contributions.",
        has_schedule: true,
        related: &[K::Apy, K::Roi, K::MillionaireCalculator],
    },
    CalculatorInfo {
        kind: K::Roi,
        slug: "roi",
        name: "ROI Calculator",
        category: Category::Investing,
        description: "Calculate your return on investment and annualized (CAGR) return.",
        has_schedule: false,
        related: &[K::CompoundInterest, K::Apy, K::MillionaireCalculator],
    },
    CalculatorInfo {
        kind: K::MillionaireCalculator,
        slug: "millionaire-calculator",
        name: "Millionaire Calculator",
        category: Category::Investing,
        description: "Find out how long it takes to reach a million with steady monthly saving.",
        has_schedule: true,
        related: &[K::CompoundInterest, K::RetirementSavings, K::SavingsGoal],
    },
    CalculatorInfo {
        kind: K::RetirementSavings,
        slug: "retirement-savings",
        name: "Retirement Savings Calculator",
        category: Category::Investing,
        description: "Check if you're on track for retirement with your current savings rate.",
        has_schedule: true,
        related: &[K::RetirementDrawdown, K::MillionaireCalculator, K::CompoundInterest],
    },
    CalculatorInfo {
        kind: K::RetirementDrawdown,
        slug: "retirement-drawdown",
        name: "Retirement Drawdown Calculator",
        category: Category::Investing,
        description: "See how long your retirement savings will last with annual withdrawals.",
        has_schedule: true,
        related: &[K::RetirementSavings, K::CompoundInterest, K::MillionaireCalculator],
    },
    CalculatorInfo {
        kind: K::CollegeSavings,
        slug: "college-savings",
        name: "College Savings Calculator",
        category: Category::Investing,
        description: "Plan for education costs and find out how much to save each month.",
        has_schedule: true,
        related: &[K::CompoundInterest, K::SavingsGoal, K::MillionaireCalculator],
    },
    CalculatorInfo {
        kind: K::Budget,
        slug: "budget",
        name: "Budget Calculator",
        category: Category::Budgeting,
        description: "Break down your income using the 50/30/20 rule for needs, wants, and savings.",
        has_schedule: false,
        related: &[K::SavingsGoal, K::EmergencyFund, K::NetWorth],
    },
    CalculatorInfo {
        kind: K::SavingsGoal,
        slug: "savings-goal",
        name: "Savings Goal Calculator",
        category: Category::Budgeting,
        description: "Find out how long it takes to reach your savings goal with monthly contributions.",
        has_schedule: false,
        related: &[K::CompoundInterest, K::EmergencyFund, K::Budget],
    },
    CalculatorInfo {
        kind: K::NetWorth,
        slug: "net-worth",
        name: "Net Worth Calculator",
        category: Category::Budgeting,
        description: "Calculate your net worth by listing your assets and liabilities.",
        has_schedule: false,
        related: &[K::Budget, K::SavingsGoal, K::EmergencyFund],
    },
    CalculatorInfo {
        kind: K::EmergencyFund,
        slug: "emergency-fund",
        name: "Emergency Fund Calculator",
        category: Category::Budgeting,
        description: "Find out how much you need in your emergency fund and your current gap.",
        has_schedule: false,
        related: &[K::Budget, K::SavingsGoal, K::NetWorth],
    },
    CalculatorInfo {
        kind: K::SalaryHourly,
        slug: "salary-hourly",
        name: "Salary to Hourly Calculator",
        category: Category::Income,
        description: "Convert between salary and hourly pay with weekly, monthly, and annual breakdowns.",
        has_schedule: false,
        related: &[K::SalaryRaise, K::FreelanceRate, K::IncomeTax],
    },
    CalculatorInfo {
        kind: K::SalaryRaise,
        slug: "salary-raise",
        name: "Salary Raise Calculator",
        category: Category::Income,
        description: "See how a raise impacts your paycheck, monthly, and annual income.",
        has_schedule: false,
        related: &[K::SalaryHourly, K::IncomeTax, K::FreelanceRate],
    },
    CalculatorInfo {
        kind: K::IncomeTax,
        slug: "income-tax",
        name: "Income Tax Calculator",
        category: Category::Income,
        description: "Estimate your federal income tax, effective rate, and take-home pay.",
        has_schedule: true,
        related: &[K::SalaryHourly, K::SalaryRaise, K::FreelanceRate],
    },
    CalculatorInfo {
        kind: K::FreelanceRate,
        slug: "freelance-rate",
        name: "Freelance Rate Calculator",
        category: Category::Income,
        description: "Calculate the hourly rate you need to charge to meet your income goals.",
        has_schedule: false,
        related: &[K::SalaryHourly, K::IncomeTax, K::SalaryRaise],
    },
    CalculatorInfo {
        kind: K::LifeInsurance,
        slug: "life-insurance",
        name: "Life Insurance Calculator",
        category: Category::Debt,
        description: "Estimate how much life insurance coverage you need.",
        has_schedule: false,
        related: &[K::NetWorth, K::EmergencyFund, K::Budget],
    },
    CalculatorInfo {
        kind: K::HelocPayment,
        slug: "heloc-payment",
        name: "HELOC Payment Calculator",
        category: Category::Debt,
        description: "Calculate payments for your home equity line of credit.",
        has_schedule: false,
        related: &[K::Mortgage, K::HomeAffordability, K::MortgageRefinance],
    },
    CalculatorInfo {
        kind: K::DebtConsolidation,
        slug: "debt-consolidation",
        name: "Debt Consolidation Calculator",
        category: Category::Debt,
        description: "Compare keeping current debts versus consolidating into one loan.",
        has_schedule: false,
        related: &[K::DebtPayoffPlanner, K::CreditCardPayoff, K::LoanPayment],
    },
    CalculatorInfo {
        kind: K::DebtPayoffPlanner,
        slug: "debt-payoff-planner",
        name: "Debt Payoff Planner",
        category: Category::Debt,
        description: "Compare snowball vs avalanche strategies to pay off debt faster.",
        has_schedule: true,
        related: &[K::CreditCardPayoff, K::DebtConsolidation, K::LoanPayoff],
    },
];

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 27] = [
        K::Mortgage,
        K::LoanPayment,
        K::LoanComparison,
        K::LoanPayoff,
        K::MortgageRefinance,
        K::HomeAffordability,
        K::RentVsBuy,
        K::CreditCardPayoff,
        K::Apy,
        K::CompoundInterest,
        K::Roi,
        K::MillionaireCalculator,
        K::RetirementSavings,
        K::RetirementDrawdown,
        K::CollegeSavings,
        K::Budget,
        K::SavingsGoal,
        K::NetWorth,
        K::EmergencyFund,
        K::SalaryHourly,
        K::SalaryRaise,
        K::IncomeTax,
        K::FreelanceRate,
        K::LifeInsurance,
        K::HelocPayment,
        K::DebtConsolidation,
        K::DebtPayoffPlanner,
    ];

    pub fn info(self) -> &'static CalculatorInfo {
        &REGISTRY[self as usize]
    }

    pub fn slug(self) -> &'static str {
        self.info().slug
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn category(self) -> Category {
        self.info().category
    }

    pub fn related(self) -> &'static [CalculatorKind] {
        self.info().related
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        REGISTRY.iter().find(|info| info.slug == slug).map(|info| info.kind)
    }

    /// Calculators in one category, in catalog order
    pub fn by_category(category: Category) -> Vec<CalculatorKind> {
        REGISTRY
            .iter()
            .filter(|info| info.category == category)
            .map(|info| info.kind)
            .collect()
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| CalcError::UnknownCalculator(s.to_string()))
    }
}
