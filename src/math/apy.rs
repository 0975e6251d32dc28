//! Nominal rate to effective annual yield conversion

use serde::{Deserialize, Serialize};

/// How often interest compounds, as chosen on the APY form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
    Continuous,
    /// User-supplied periods per year
    Custom,
}

/// Number of compounding periods per year, or continuous compounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compounding {
    PerYear(u32),
    Continuous,
}

/// Periods per year assumed when a custom frequency arrives without a count
pub const DEFAULT_CUSTOM_PERIODS: u32 = 12;

impl CompoundFrequency {
    /// Resolve to a period count; `custom_n` only applies to [`CompoundFrequency::Custom`]
    pub fn compounding(self, custom_n: Option<u32>) -> Compounding {
        match self {
            CompoundFrequency::Daily => Compounding::PerYear(365),
            CompoundFrequency::Weekly => Compounding::PerYear(52),
            CompoundFrequency::Monthly => Compounding::PerYear(12),
            CompoundFrequency::Quarterly => Compounding::PerYear(4),
            CompoundFrequency::Annual => Compounding::PerYear(1),
            CompoundFrequency::Continuous => Compounding::Continuous,
            CompoundFrequency::Custom => {
                Compounding::PerYear(custom_n.unwrap_or(DEFAULT_CUSTOM_PERIODS))
            }
        }
    }
}

/// Effective annual yield (decimal) for a nominal annual percentage
///
/// APY = (1 + r/n)ⁿ − 1, or eʳ − 1 when compounding is continuous.
/// Zero periods per year yields 0.
pub fn compute_apy(nominal_rate_pct: f64, compounding: Compounding) -> f64 {
    let r = nominal_rate_pct / 100.0;
    match compounding {
        Compounding::Continuous => r.exp() - 1.0,
        Compounding::PerYear(0) => 0.0,
        Compounding::PerYear(n) => {
            let n = n as f64;
            (1.0 + r / n).powf(n) - 1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_daily_compounding() {
        let apy = compute_apy(5.0, CompoundFrequency::Daily.compounding(None));
        assert_abs_diff_eq!(apy * 100.0, 5.1267, epsilon = 1e-4);
    }

    #[test]
    fn test_annual_compounding_equals_nominal() {
        let apy = compute_apy(4.0, Compounding::PerYear(1));
        assert_abs_diff_eq!(apy, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_defaults_to_monthly() {
        assert_eq!(CompoundFrequency::Custom.compounding(None), Compounding::PerYear(12));
        assert_eq!(CompoundFrequency::Custom.compounding(Some(6)), Compounding::PerYear(6));
        assert_eq!(CompoundFrequency::Monthly.compounding(Some(6)), Compounding::PerYear(12));
    }

    #[test]
    fn test_apy_at_least_nominal() {
        for rate in [0.01, 1.0, 5.0, 22.99, 100.0] {
            for n in [1, 2, 4, 12, 52, 365] {
                let apy = compute_apy(rate, Compounding::PerYear(n));
                assert!(apy >= rate / 100.0 - 1e-15, "rate {} n {} gave {}", rate, n, apy);
            }
        }
    }

    #[test]
    fn test_continuous_is_supremum() {
        let rate = 7.5;
        let continuous = compute_apy(rate, Compounding::Continuous);
        let mut previous = 0.0;
        for n in [1, 2, 4, 12, 52, 365, 8760, 525_600] {
            let apy = compute_apy(rate, Compounding::PerYear(n));
            assert!(apy >= previous, "APY must not decrease as n grows");
            assert!(apy <= continuous + 1e-12);
            previous = apy;
        }
        assert_abs_diff_eq!(previous, continuous, epsilon = 1e-7);
    }

    #[test]
    fn test_zero_periods() {
        assert_eq!(compute_apy(5.0, Compounding::PerYear(0)), 0.0);
    }

    #[test]
    fn test_frequency_names() {
        let freq: CompoundFrequency = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(freq, CompoundFrequency::Quarterly);
    }
}
