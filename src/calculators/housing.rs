//! Home buying: affordability under DTI limits and rent versus buy

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ValidationErrors;
use crate::math::{monthly_rate, round, round2, solve_for_payment};
use crate::validation::{Validate, Validator};

use super::{Calculator, CalculatorKind};

// ============================================================================
// Home affordability
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeAffordabilityInput {
    pub annual_income: f64,
    pub monthly_debts: f64,
    pub down_payment_percent: f64,
    pub rate: f64,
    pub term_years: f64,
    /// Annual property tax as a percent of the home price
    pub property_tax_rate: f64,
    pub annual_insurance: f64,
}

impl Validate for HomeAffordabilityInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("annualIncome", self.annual_income, 1_000.0, 100_000_000.0)
            .range("monthlyDebts", self.monthly_debts, 0.0, 1_000_000.0)
            .range_exclusive("downPaymentPercent", self.down_payment_percent, 0.0, 100.0)
            .range("rate", self.rate, 0.01, 30.0)
            .whole("termYears", self.term_years, 1.0, 50.0)
            .range("propertyTaxRate", self.property_tax_rate, 0.0, 10.0)
            .range("annualInsurance", self.annual_insurance, 0.0, 100_000.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeAffordabilityResult {
    pub max_home_price: f64,
    pub max_loan_amount: f64,
    pub down_payment_amount: f64,
    /// Principal and interest
    pub estimated_monthly_payment: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    pub total_monthly_housing: f64,
    /// Housing cost as a percent of gross monthly income
    #[serde(rename = "frontEndDTI")]
    pub front_end_dti: f64,
    /// Housing plus other debts as a percent of gross monthly income
    #[serde(rename = "backEndDTI")]
    pub back_end_dti: f64,
}

/// Largest home price whose total housing cost fits both DTI ceilings
///
/// P&I, property tax and insurance are each linear in the loan amount, so the
/// budget equation solves directly:
/// `loan · (payment_per_dollar + tax_rate / (1 − down)) + insurance = max_housing`.
pub struct HomeAffordability;

impl Calculator for HomeAffordability {
    const KIND: CalculatorKind = CalculatorKind::HomeAffordability;
    type Input = HomeAffordabilityInput;
    type Output = HomeAffordabilityResult;

    fn calculate(input: &HomeAffordabilityInput, assumptions: &Assumptions) -> HomeAffordabilityResult {
        let monthly_income = input.annual_income / 12.0;
        let total_payments = input.term_years as u32 * 12;
        let dti = &assumptions.dti;

        let max_housing = (monthly_income * dti.front_end)
            .min(monthly_income * dti.back_end - input.monthly_debts);

        let down = input.down_payment_percent / 100.0;
        let monthly_tax_rate = input.property_tax_rate / 100.0 / 12.0;
        let monthly_insurance = input.annual_insurance / 12.0;

        let payment_per_dollar = solve_for_payment(1.0, input.rate, total_payments);
        let cost_per_dollar = payment_per_dollar + monthly_tax_rate / (1.0 - down);
        let max_loan = ((max_housing - monthly_insurance) / cost_per_dollar).max(0.0);

        let max_home_price = max_loan / (1.0 - down);
        let principal_interest = solve_for_payment(max_loan, input.rate, total_payments);
        let monthly_taxes = max_home_price * monthly_tax_rate;
        let total_housing = principal_interest + monthly_taxes + monthly_insurance;

        HomeAffordabilityResult {
            max_home_price: round2(max_home_price),
            max_loan_amount: round2(max_loan),
            down_payment_amount: round2(max_home_price * down),
            estimated_monthly_payment: round2(principal_interest),
            monthly_taxes: round2(monthly_taxes),
            monthly_insurance: round2(monthly_insurance),
            total_monthly_housing: round2(total_housing),
            front_end_dti: round(total_housing / monthly_income * 100.0, 1),
            back_end_dti: round((total_housing + input.monthly_debts) / monthly_income * 100.0, 1),
        }
    }
}

// ============================================================================
// Rent vs buy
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyInput {
    pub monthly_rent: f64,
    /// Yearly rent increase, percent
    pub rent_increase: f64,
    pub home_price: f64,
    pub down_payment_percent: f64,
    pub rate: f64,
    pub term_years: f64,
    pub property_tax_rate: f64,
    pub annual_insurance: f64,
    /// Yearly maintenance as a percent of the home price
    pub maintenance_percent: f64,
    /// Return the renter earns on the down payment they keep invested
    pub investment_return: f64,
    pub comparison_years: f64,
}

impl Validate for RentVsBuyInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("monthlyRent", self.monthly_rent, 100.0, 100_000.0)
            .range("rentIncrease", self.rent_increase, 0.0, 20.0)
            .range("homePrice", self.home_price, 10_000.0, 100_000_000.0)
            .range("downPaymentPercent", self.down_payment_percent, 0.0, 100.0)
            .range("rate", self.rate, 0.01, 30.0)
            .whole("termYears", self.term_years, 1.0, 50.0)
            .range("propertyTaxRate", self.property_tax_rate, 0.0, 10.0)
            .range("annualInsurance", self.annual_insurance, 0.0, 100_000.0)
            .range("maintenancePercent", self.maintenance_percent, 0.0, 10.0)
            .range("investmentReturn", self.investment_return, 0.0, 30.0)
            .whole("comparisonYears", self.comparison_years, 1.0, 50.0);
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyYear {
    pub year: u32,
    pub cumulative_rent: f64,
    /// Down payment plus every P&I, tax, insurance and maintenance dollar so far
    pub cumulative_buy_cost: f64,
    /// Home price less the remaining loan balance (no appreciation)
    pub home_equity: f64,
    pub net_buy_cost: f64,
    /// The down payment as it would have grown had the renter invested it
    pub renter_investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyResult {
    /// First year in which buying nets out cheaper than renting
    pub break_even_year: Option<u32>,
    pub total_rent_cost: f64,
    pub total_buy_cost: f64,
    pub total_equity: f64,
    /// Cumulative rent less net buy cost in the final year
    pub net_buy_advantage: f64,
    pub table: Vec<RentVsBuyYear>,
}

pub struct RentVsBuy;

impl Calculator for RentVsBuy {
    const KIND: CalculatorKind = CalculatorKind::RentVsBuy;
    type Input = RentVsBuyInput;
    type Output = RentVsBuyResult;

    fn calculate(input: &RentVsBuyInput, _: &Assumptions) -> RentVsBuyResult {
        let down_payment = input.home_price * input.down_payment_percent / 100.0;
        let loan_amount = input.home_price - down_payment;
        let rate = monthly_rate(input.rate);
        let total_payments = input.term_years as u32 * 12;
        let payment = solve_for_payment(loan_amount, input.rate, total_payments);

        let yearly_upkeep = input.home_price * input.property_tax_rate / 100.0
            + input.annual_insurance
            + input.home_price * input.maintenance_percent / 100.0;
        let invest_rate = monthly_rate(input.investment_return);

        let mut rent = input.monthly_rent;
        let mut cumulative_rent = 0.0;
        let mut cumulative_buy = down_payment;
        let mut loan_balance = loan_amount;
        let mut invested = down_payment;
        let mut break_even_year = None;
        let comparison_years = input.comparison_years as u32;
        let mut table = Vec::with_capacity(comparison_years as usize);

        for year in 1..=comparison_years {
            for _ in 0..12 {
                invested *= 1.0 + invest_rate;
            }
            cumulative_rent += rent * 12.0;
            rent *= 1.0 + input.rent_increase / 100.0;

            let first_month = (year - 1) * 12;
            for m in 0..12 {
                if first_month + m < total_payments && loan_balance > 0.0 {
                    let interest = loan_balance * rate;
                    loan_balance = (loan_balance - (payment - interest)).max(0.0);
                    cumulative_buy += payment;
                }
            }
            cumulative_buy += yearly_upkeep;

            let home_equity = input.home_price - loan_balance;
            let net_buy_cost = cumulative_buy - home_equity;
            if break_even_year.is_none() && net_buy_cost < cumulative_rent {
                break_even_year = Some(year);
            }

            table.push(RentVsBuyYear {
                year,
                cumulative_rent: round2(cumulative_rent),
                cumulative_buy_cost: round2(cumulative_buy),
                home_equity: round2(home_equity),
                net_buy_cost: round2(net_buy_cost),
                renter_investment: round2(invested),
            });
        }

        // comparison_years >= 1 after validation
        let (total_rent_cost, total_buy_cost, total_equity, net_buy_cost) = table
            .last()
            .map(|r| (r.cumulative_rent, r.cumulative_buy_cost, r.home_equity, r.net_buy_cost))
            .unwrap_or_default();

        RentVsBuyResult {
            break_even_year,
            total_rent_cost,
            total_buy_cost,
            total_equity,
            net_buy_advantage: round2(total_rent_cost - net_buy_cost),
            table,
        }
    }
}
