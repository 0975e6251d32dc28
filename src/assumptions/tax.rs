//! Progressive income tax brackets

use serde::{Deserialize, Serialize};

/// One marginal bracket; `max = None` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: f64,
    pub max: Option<f64>,
    /// Marginal rate as a percentage (22 means 22%)
    pub rate: f64,
}

impl TaxBracket {
    /// Portion of `taxable_income` that falls inside this bracket
    pub fn taxable_amount(&self, taxable_income: f64) -> f64 {
        if taxable_income <= self.min {
            return 0.0;
        }
        let top = match self.max {
            Some(max) => taxable_income.min(max),
            None => taxable_income,
        };
        top - self.min
    }
}

/// Bracket table plus the standard deduction for one filing status
#[derive(Debug, Clone, PartialEq)]
pub struct TaxTable {
    brackets: Vec<TaxBracket>,
    standard_deduction: f64,
}

impl TaxTable {
    /// Build from loaded brackets; they must start at zero, ascend and be contiguous
    pub fn from_loaded(brackets: Vec<TaxBracket>, standard_deduction: f64) -> Result<Self, String> {
        let first = brackets.first().ok_or_else(|| "no tax brackets".to_string())?;
        if first.min != 0.0 {
            return Err(format!("first bracket starts at {} instead of 0", first.min));
        }
        for pair in brackets.windows(2) {
            match pair[0].max {
                Some(max) if max == pair[1].min => {}
                Some(max) => {
                    return Err(format!("gap between bracket ending {} and bracket starting {}", max, pair[1].min));
                }
                None => return Err("only the last bracket may be unbounded".to_string()),
            }
        }
        if let Some(max) = brackets.last().and_then(|b| b.max) {
            return Err(format!("last bracket ends at {}; it must be unbounded", max));
        }
        Ok(Self {
            brackets,
            standard_deduction,
        })
    }

    /// 2025 US federal brackets, single filer
    pub fn federal_2025_single() -> Self {
        Self {
            brackets: vec![
                TaxBracket { min: 0.0, max: Some(11_925.0), rate: 10.0 },
                TaxBracket { min: 11_925.0, max: Some(48_475.0), rate: 12.0 },
                TaxBracket { min: 48_475.0, max: Some(103_350.0), rate: 22.0 },
                TaxBracket { min: 103_350.0, max: Some(197_300.0), rate: 24.0 },
                TaxBracket { min: 197_300.0, max: Some(250_525.0), rate: 32.0 },
                TaxBracket { min: 250_525.0, max: Some(626_350.0), rate: 35.0 },
                TaxBracket { min: 626_350.0, max: None, rate: 37.0 },
            ],
            standard_deduction: 15_000.0,
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn standard_deduction(&self) -> f64 {
        self.standard_deduction
    }

    /// Replace the standard deduction
    pub fn with_standard_deduction(mut self, amount: f64) -> Self {
        self.standard_deduction = amount;
        self
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        Self::federal_2025_single()
    }
}
