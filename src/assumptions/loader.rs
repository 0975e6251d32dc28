//! CSV-based assumption loader
//!
//! Loads calculator assumptions from CSV files in data/assumptions/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::tax::TaxBracket;
use crate::error::{CalcError, Result};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

pub const TAX_BRACKETS_FILE: &str = "tax_brackets.csv";
pub const PARAMETERS_FILE: &str = "parameters.csv";

/// Raw row of tax_brackets.csv; an empty `max` is the open-ended top bracket
#[derive(Debug, Deserialize)]
struct BracketRow {
    min: f64,
    max: Option<f64>,
    rate: f64,
}

/// Load tax brackets from any reader
pub fn load_tax_brackets_from_reader<R: Read>(reader: R) -> Result<Vec<TaxBracket>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut brackets = Vec::new();

    for result in csv_reader.deserialize() {
        let row: BracketRow = result?;
        brackets.push(TaxBracket {
            min: row.min,
            max: row.max,
            rate: row.rate,
        });
    }

    Ok(brackets)
}

/// Load tax brackets from `<dir>/tax_brackets.csv`
pub fn load_tax_brackets(dir: &Path) -> Result<Vec<TaxBracket>> {
    let path = dir.join(TAX_BRACKETS_FILE);
    let brackets = load_tax_brackets_from_reader(File::open(&path)?)?;
    debug!("loaded {} tax brackets from {}", brackets.len(), path.display());
    Ok(brackets)
}

/// Load `name,value` parameter overrides from any reader
pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut params = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().trim().to_string();
        let raw = record.get(1).unwrap_or_default().trim();
        let value: f64 = raw.parse().map_err(|_| CalcError::Assumption {
            name: name.clone(),
            message: format!("'{}' is not a number", raw),
        })?;
        params.push((name, value));
    }

    Ok(params)
}

/// Load parameter overrides from `<dir>/parameters.csv`
pub fn load_parameters(dir: &Path) -> Result<Vec<(String, f64)>> {
    let path = dir.join(PARAMETERS_FILE);
    let params = load_parameters_from_reader(File::open(&path)?)?;
    debug!("loaded {} parameters from {}", params.len(), path.display());
    Ok(params)
}

/// Raw tables read from one assumptions directory
#[derive(Debug, Clone)]
pub struct LoadedAssumptions {
    pub tax_brackets: Vec<TaxBracket>,
    pub parameters: Vec<(String, f64)>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            tax_brackets: load_tax_brackets(path)?,
            parameters: load_parameters(path)?,
        })
    }
}
