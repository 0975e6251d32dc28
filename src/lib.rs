//! calckit - Personal finance calculator engines
//!
//! This library provides:
//! - Loan amortization, payment and payoff math
//! - Compound growth, APY and retirement accumulation/drawdown projections
//! - Multi-debt avalanche/snowball payoff planning
//! - Budgeting, income and tax calculators
//! - A registry of 27 calculators with JSON dispatch by slug

pub mod amortization;
pub mod assumptions;
pub mod batch;
pub mod calculators;
pub mod error;
pub mod math;
pub mod simulation;
pub mod validation;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use batch::{BatchRunner, LoanScenario, ScenarioResult};
pub use calculators::{Calculator, CalculatorKind, Category};
pub use error::{CalcError, FieldError, Result, ValidationErrors};
pub use simulation::Horizon;
pub use validation::Validate;
