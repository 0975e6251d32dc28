//! Calculator engines
//!
//! Every calculator is a unit struct implementing [`Calculator`]: a typed,
//! serde-deserializable input record, a pure `calculate` function and a
//! serializable output record. [`CalculatorKind::run_json`] dispatches an
//! untyped JSON record to the matching engine by slug.
//!
//! # Example
//!
//! ```rust,ignore
//! use calckit::calculators::{Calculator, CreditCardPayoff, CreditCardPayoffInput};
//! use calckit::Assumptions;
//!
//! let input = CreditCardPayoffInput { balance: 5000.0, apr: 22.99, monthly_payment: 100.0 };
//! let result = CreditCardPayoff::run(&input, &Assumptions::default())?;
//! ```

mod budgeting;
mod housing;
mod income;
mod insurance;
mod investing;
mod loans;
mod payoff;
mod registry;
mod retirement;

pub use budgeting::{
    Budget, BudgetInput, BudgetResult, BudgetShare, EmergencyFund, EmergencyFundInput,
    EmergencyFundResult, LineItem, NetWorth, NetWorthInput, NetWorthResult, SavingsGoal,
    SavingsGoalInput, SavingsGoalResult,
};
pub use housing::{
    HomeAffordability, HomeAffordabilityInput, HomeAffordabilityResult, RentVsBuy,
    RentVsBuyInput, RentVsBuyResult, RentVsBuyYear,
};
pub use income::{
    FreelanceRate, FreelanceRateInput, FreelanceRateResult, IncomeTax, IncomeTaxInput,
    IncomeTaxResult, PayMode, SalaryHourly, SalaryHourlyInput, SalaryHourlyResult, SalaryRaise,
    SalaryRaiseInput, SalaryRaiseResult, TaxBracketRow,
};
pub use insurance::{LifeInsurance, LifeInsuranceInput, LifeInsuranceResult};
pub use investing::{
    Apy, ApyInput, ApyResult, ApyYear, CompoundInterest, CompoundInterestInput,
    CompoundInterestResult, GrowthYear, Millionaire, MillionaireInput, MillionaireResult, Roi,
    RoiInput, RoiResult, SavingsYear,
};
pub use loans::{
    Cheaper, Heloc, HelocInput, HelocResult, LoanComparison, LoanComparisonInput,
    LoanComparisonResult, LoanPayment, LoanPaymentInput, LoanSide, Mortgage,
    MortgageInput, MortgageRefinance, MortgageRefinanceInput, MortgageRefinanceResult,
    ScheduledLoanResult,
};
pub use payoff::{
    CreditCardPayoff, CreditCardPayoffInput, CreditCardPayoffResult, DebtConsolidation,
    DebtConsolidationInput, DebtConsolidationResult, DebtPayoffPlanner, DebtPayoffPlannerInput,
    LoanPayoff, LoanPayoffInput, LoanPayoffResult, PayoffOutcome,
};
pub use registry::{CalculatorInfo, CalculatorKind, Category};
pub use retirement::{
    CollegeSavings, CollegeSavingsInput, CollegeSavingsResult, RetirementDrawdown,
    RetirementDrawdownInput, RetirementDrawdownResult, RetirementSavings, RetirementSavingsInput,
    RetirementSavingsResult, WithdrawalYear,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::validation::Validate;

/// A single calculator: validated input in, result record out
pub trait Calculator {
    const KIND: CalculatorKind;

    type Input: DeserializeOwned + Validate;
    type Output: Serialize;

    /// Pure computation; `input` is assumed to have passed validation
    fn calculate(input: &Self::Input, assumptions: &Assumptions) -> Self::Output;

    /// Validate every field, then calculate
    fn run(input: &Self::Input, assumptions: &Assumptions) -> Result<Self::Output> {
        input.validate()?;
        Ok(Self::calculate(input, assumptions))
    }
}

/// Deserialize, validate and run one calculator on a JSON record
pub fn run_json<C: Calculator>(input: Value, assumptions: &Assumptions) -> Result<Value> {
    let input: C::Input = serde_json::from_value(input)?;
    let output = C::run(&input, assumptions)?;
    Ok(serde_json::to_value(output)?)
}

impl CalculatorKind {
    /// Run the calculator this kind names on a JSON input record
    pub fn run_json(self, input: Value, assumptions: &Assumptions) -> Result<Value> {
        use CalculatorKind as K;

        log::debug!("running {}", self);
        match self {
            K::Mortgage => run_json::<Mortgage>(input, assumptions),
            K::LoanPayment => run_json::<LoanPayment>(input, assumptions),
            K::LoanComparison => run_json::<LoanComparison>(input, assumptions),
            K::LoanPayoff => run_json::<LoanPayoff>(input, assumptions),
            K::MortgageRefinance => run_json::<MortgageRefinance>(input, assumptions),
            K::HomeAffordability => run_json::<HomeAffordability>(input, assumptions),
            K::RentVsBuy => run_json::<RentVsBuy>(input, assumptions),
            K::CreditCardPayoff => run_json::<CreditCardPayoff>(input, assumptions),
            K::Apy => run_json::<Apy>(input, assumptions),
            K::CompoundInterest => run_json::<CompoundInterest>(input, assumptions),
            K::Roi => run_json::<Roi>(input, assumptions),
            K::MillionaireCalculator => run_json::<Millionaire>(input, assumptions),
            K::RetirementSavings => run_json::<RetirementSavings>(input, assumptions),
            K::RetirementDrawdown => run_json::<RetirementDrawdown>(input, assumptions),
            K::CollegeSavings => run_json::<CollegeSavings>(input, assumptions),
            K::Budget => run_json::<Budget>(input, assumptions),
            K::SavingsGoal => run_json::<SavingsGoal>(input, assumptions),
            K::NetWorth => run_json::<NetWorth>(input, assumptions),
            K::EmergencyFund => run_json::<EmergencyFund>(input, assumptions),
            K::SalaryHourly => run_json::<SalaryHourly>(input, assumptions),
            K::SalaryRaise => run_json::<SalaryRaise>(input, assumptions),
            K::IncomeTax => run_json::<IncomeTax>(input, assumptions),
            K::FreelanceRate => run_json::<FreelanceRate>(input, assumptions),
            K::LifeInsurance => run_json::<LifeInsurance>(input, assumptions),
            K::HelocPayment => run_json::<Heloc>(input, assumptions),
            K::DebtConsolidation => run_json::<DebtConsolidation>(input, assumptions),
            K::DebtPayoffPlanner => run_json::<DebtPayoffPlanner>(input, assumptions),
        }
    }
}
