//! Batch evaluation of fixed-rate loan scenarios
//!
//! Reads `id,principal,rate,years` rows, prices each one with the shared
//! amortization formulas and writes `id,monthly_payment,total_payment,
//! total_interest,error`. A row that fails validation is reported in the
//! `error` column; the rest of the batch still runs.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::amortization::LoanSummary;
use crate::error::{Result, ValidationErrors};
use crate::validation::{Validate, Validator};

/// One input row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanScenario {
    pub id: String,
    pub principal: f64,
    /// Annual rate, percent
    pub rate: f64,
    /// Whole years; a fractional value is a row error, not a load failure
    pub years: f64,
}

impl Validate for LoanScenario {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.non_empty("id", &self.id)
            .range("principal", self.principal, 1_000.0, 10_000_000.0)
            .range("rate", self.rate, 0.01, 30.0)
            .whole("years", self.years, 1.0, 50.0);
        v.finish()
    }
}

/// One output row; figures are empty when `error` is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub id: String,
    pub monthly_payment: Option<f64>,
    pub total_payment: Option<f64>,
    pub total_interest: Option<f64>,
    pub error: Option<String>,
}

/// Load scenarios from any reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<LoanScenario>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let scenario: LoanScenario = result?;
        scenarios.push(scenario);
    }

    Ok(scenarios)
}

/// Load scenarios from a CSV file
pub fn load_scenarios(path: &Path) -> Result<Vec<LoanScenario>> {
    let scenarios = load_scenarios_from_reader(File::open(path)?)?;
    debug!("loaded {} loan scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Prices loan scenarios one row at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRunner;

impl BatchRunner {
    /// Price a single scenario
    pub fn run(&self, scenario: &LoanScenario) -> ScenarioResult {
        if let Err(errors) = scenario.validate() {
            warn!("scenario {:?} rejected: {}", scenario.id, errors);
            return ScenarioResult {
                id: scenario.id.clone(),
                monthly_payment: None,
                total_payment: None,
                total_interest: None,
                error: Some(errors.to_string()),
            };
        }

        let summary = LoanSummary::compute(
            scenario.principal,
            scenario.rate,
            scenario.years as u32 * 12,
        );
        ScenarioResult {
            id: scenario.id.clone(),
            monthly_payment: Some(summary.monthly_payment),
            total_payment: Some(summary.total_payment),
            total_interest: Some(summary.total_interest),
            error: None,
        }
    }

    /// Price every scenario, preserving input order
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<ScenarioResult> {
        let results: Vec<_> = scenarios.iter().map(|s| self.run(s)).collect();
        let failed = results.iter().filter(|r| r.error.is_some()).count();
        debug!("batch complete: {} scenarios, {} rejected", results.len(), failed);
        results
    }
}

/// Write results as CSV with a header row
pub fn write_results<W: Write>(results: &[ScenarioResult], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in results {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
