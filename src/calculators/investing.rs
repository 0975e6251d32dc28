//! Growth calculators: APY, compound interest, ROI and time to a savings target

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ValidationErrors;
use crate::math::{cagr, compute_apy, future_value, round, round2, CompoundFrequency};
use crate::simulation::{accumulate_until, AccumulationYear, Horizon};
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};

/// Projection length for the APY growth table when none is given
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// One year of a savings run, rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsYear {
    pub year: u32,
    /// Age at the end of the year, for calculators that track one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub start_balance: f64,
    pub contribution: f64,
    pub interest: f64,
    pub end_balance: f64,
}

impl From<&AccumulationYear> for SavingsYear {
    fn from(y: &AccumulationYear) -> Self {
        Self {
            year: y.year,
            age: None,
            start_balance: round2(y.start_balance),
            contribution: round2(y.contribution),
            interest: round2(y.interest),
            end_balance: round2(y.end_balance),
        }
    }
}

impl SavingsYear {
    pub(crate) fn at_age(mut self, starting_age: u32) -> Self {
        self.age = Some(starting_age + self.year);
        self
    }
}

// ============================================================================
// APY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApyInput {
    pub apr: f64,
    pub compound_frequency: CompoundFrequency,
    /// Periods per year for the custom frequency
    #[serde(default)]
    pub custom_n: Option<f64>,
    /// Deposit to project forward at the resulting APY
    #[serde(default)]
    pub principal: Option<f64>,
    #[serde(default)]
    pub projection_years: Option<f64>,
}

impl Validate for ApyInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("apr", self.apr, 0.01, 100.0);
        if let Some(n) = self.custom_n {
            v.whole("customN", n, 1.0, u32::MAX as f64);
        }
        if let Some(principal) = self.principal {
            v.range("principal", principal, 0.0, 100_000_000.0);
        }
        if let Some(years) = self.projection_years {
            v.whole("projectionYears", years, 1.0, 50.0);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApyYear {
    pub year: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApyResult {
    /// Percent, 4 decimals
    pub apy: f64,
    /// Year 0 through the projection horizon; empty without a principal
    pub growth: Vec<ApyYear>,
}

pub struct Apy;

impl Calculator for Apy {
    const KIND: CalculatorKind = CalculatorKind::Apy;
    type Input = ApyInput;
    type Output = ApyResult;

    fn calculate(input: &ApyInput, _: &Assumptions) -> ApyResult {
        let compounding = input
            .compound_frequency
            .compounding(input.custom_n.map(|n| n as u32));
        let apy = compute_apy(input.apr, compounding);

        let growth = match input.principal {
            Some(principal) => {
                let years = input
                    .projection_years
                    .map_or(DEFAULT_PROJECTION_YEARS, |y| y as u32);
                (0..=years)
                    .map(|year| ApyYear {
                        year,
                        balance: round2(principal * (1.0 + apy).powi(year as i32)),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        ApyResult {
            apy: round(apy * 100.0, 4),
            growth,
        }
    }
}

// ============================================================================
// Compound interest
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub compounds_per_year: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
}

impl Validate for CompoundInterestInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("principal", self.principal, 0.0, 100_000_000.0)
            .range("annualRate", self.annual_rate, 0.01, 100.0)
            .whole("years", self.years, 1.0, 100.0)
            .whole("compoundsPerYear", self.compounds_per_year, 1.0, 365.0)
            .range("monthlyContribution", self.monthly_contribution, 0.0, 1_000_000.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub year: u32,
    pub balance: f64,
    /// Principal plus every contribution so far
    pub contributions: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest_earned: f64,
    pub table: Vec<GrowthYear>,
}

pub struct CompoundInterest;

impl CompoundInterest {
    fn year(input: &CompoundInterestInput, year: u32) -> GrowthYear {
        let per_period = input.monthly_contribution * 12.0 / input.compounds_per_year;
        let balance = future_value(
            input.principal,
            input.annual_rate,
            year as f64,
            input.compounds_per_year as u32,
            per_period,
        );
        let contributions = input.principal + input.monthly_contribution * 12.0 * year as f64;

        GrowthYear {
            year,
            balance: round2(balance),
            contributions: round2(contributions),
            interest_earned: round2(balance - contributions),
        }
    }
}

impl Calculator for CompoundInterest {
    const KIND: CalculatorKind = CalculatorKind::CompoundInterest;
    type Input = CompoundInterestInput;
    type Output = CompoundInterestResult;

    fn calculate(input: &CompoundInterestInput, _: &Assumptions) -> CompoundInterestResult {
        let years = input.years as u32;
        let table: Vec<GrowthYear> = (0..=years).map(|y| Self::year(input, y)).collect();
        let last = Self::year(input, years);

        CompoundInterestResult {
            final_balance: last.balance,
            total_contributions: last.contributions,
            total_interest_earned: last.interest_earned,
            table,
        }
    }
}

// ============================================================================
// ROI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInput {
    pub initial_investment: f64,
    pub final_value: f64,
    pub years: f64,
}

impl Validate for RoiInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("initialInvestment", self.initial_investment)
            .positive("finalValue", self.final_value)
            .positive("years", self.years);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub total_return: f64,
    pub net_profit: f64,
    /// Percent
    pub roi: f64,
    /// Compound annual growth rate, percent
    #[serde(rename = "annualizedROI")]
    pub annualized_roi: f64,
}

pub struct Roi;

impl Calculator for Roi {
    const KIND: CalculatorKind = CalculatorKind::Roi;
    type Input = RoiInput;
    type Output = RoiResult;

    fn calculate(input: &RoiInput, _: &Assumptions) -> RoiResult {
        let net_profit = input.final_value - input.initial_investment;
        let roi = net_profit / input.initial_investment * 100.0;
        let annualized = cagr(input.initial_investment, input.final_value, input.years) * 100.0;

        RoiResult {
            total_return: round2(input.final_value),
            net_profit: round2(net_profit),
            roi: round2(roi),
            annualized_roi: round2(annualized),
        }
    }
}

// ============================================================================
// Millionaire
// ============================================================================

fn default_target() -> f64 {
    1_000_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MillionaireInput {
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    #[serde(default = "default_target")]
    pub target_amount: f64,
}

impl Validate for MillionaireInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.at_least("currentSavings", self.current_savings, 0.0)
            .positive("monthlyContribution", self.monthly_contribution)
            .range("annualReturn", self.annual_return, 0.0, 50.0)
            .positive("targetAmount", self.target_amount);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MillionaireResult {
    /// Whole years until the balance first reaches the target
    pub years_to_target: Horizon,
    /// Current savings plus every contribution
    pub total_contributions: f64,
    pub total_interest: f64,
    pub final_balance: f64,
    pub schedule: Vec<SavingsYear>,
}

/// Years of steady saving until a target balance
pub struct Millionaire;

impl Calculator for Millionaire {
    const KIND: CalculatorKind = CalculatorKind::MillionaireCalculator;
    type Input = MillionaireInput;
    type Output = MillionaireResult;

    fn calculate(input: &MillionaireInput, assumptions: &Assumptions) -> MillionaireResult {
        let (acc, reached) = accumulate_until(
            input.current_savings,
            input.annual_return,
            input.monthly_contribution,
            input.target_amount,
            assumptions.limits.target_years,
        );

        MillionaireResult {
            years_to_target: if reached {
                Horizon::Finite(acc.years.len() as u32)
            } else {
                Horizon::Never
            },
            total_contributions: round2(input.current_savings + acc.contributed),
            total_interest: round2(acc.interest),
            final_balance: round2(acc.balance),
            schedule: acc.years.iter().map(SavingsYear::from).collect(),
        }
    }
}
