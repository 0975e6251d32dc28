//! Shared financial math used by every calculator engine
//!
//! Closed-form formulas only; the month-by-month loops live in
//! [`crate::simulation`].

mod annuity;
mod apy;
mod format;
mod growth;

pub use annuity::{
    monthly_rate, solve_for_contribution, solve_for_payment, solve_for_principal, total_interest,
};
pub use apy::{compute_apy, CompoundFrequency, Compounding, DEFAULT_CUSTOM_PERIODS};
pub use format::{format_currency, format_number, format_percent, round, round2};
pub use growth::{cagr, future_value, periodic_rate, present_value};
