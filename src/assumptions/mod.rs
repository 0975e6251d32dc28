//! Calculator assumptions: tax tables, DTI limits and simulation caps

mod limits;
pub mod loader;
mod tax;

pub use limits::{DtiLimits, IterationLimits};
pub use loader::LoadedAssumptions;
pub use tax::{TaxBracket, TaxTable};

use std::path::Path;

use crate::error::{CalcError, Result};

/// Container for all tunable calculator assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub tax: TaxTable,
    pub dti: DtiLimits,
    pub limits: IterationLimits,
}

impl Assumptions {
    /// Built-in values (2025 federal single-filer tax table)
    pub fn default_2025() -> Self {
        Self::default()
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;
        Self::from_loaded(loaded)
    }

    /// Build from loaded tables; parameters not named keep their built-in values
    pub fn from_loaded(loaded: LoadedAssumptions) -> Result<Self> {
        let mut assumptions = Self::default();
        let mut standard_deduction = assumptions.tax.standard_deduction();

        for (name, value) in &loaded.parameters {
            let value = *value;
            match name.as_str() {
                "standard_deduction" => standard_deduction = value,
                "front_end_dti" => assumptions.dti.front_end = value,
                "back_end_dti" => assumptions.dti.back_end = value,
                "payoff_months" => assumptions.limits.payoff_months = whole(name, value)?,
                "plan_months" => assumptions.limits.plan_months = whole(name, value)?,
                "drawdown_years" => assumptions.limits.drawdown_years = whole(name, value)?,
                "target_years" => assumptions.limits.target_years = whole(name, value)?,
                "goal_months" => assumptions.limits.goal_months = whole(name, value)?,
                "paid_threshold" => assumptions.limits.paid_threshold = value,
                other => {
                    return Err(CalcError::Assumption {
                        name: other.to_string(),
                        message: "unknown parameter".to_string(),
                    })
                }
            }
        }

        let threshold = assumptions.limits.paid_threshold;
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(CalcError::Assumption {
                name: "paid_threshold".to_string(),
                message: format!("{} is not a positive amount", threshold),
            });
        }
        ratio("front_end_dti", assumptions.dti.front_end)?;
        ratio("back_end_dti", assumptions.dti.back_end)?;

        assumptions.tax = TaxTable::from_loaded(loaded.tax_brackets, standard_deduction).map_err(
            |message| CalcError::Assumption {
                name: loader::TAX_BRACKETS_FILE.to_string(),
                message,
            },
        )?;

        Ok(assumptions)
    }
}

/// Parameters counting months or years must be positive whole numbers
fn whole(name: &str, value: f64) -> Result<u32> {
    if value.fract() == 0.0 && value >= 1.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(CalcError::Assumption {
            name: name.to_string(),
            message: format!("{} is not a positive whole number", value),
        })
    }
}

/// Debt-to-income limits are fractions strictly between 0 and 1
fn ratio(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(CalcError::Assumption {
            name: name.to_string(),
            message: format!("{} is not between 0 and 1", value),
        })
    }
}
