use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::tables::RateTables;
use crate::time_value::{amounts_in_range, MAX_AMOUNT};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HraInput {
    pub basic_salary: Money,
    #[serde(default)]
    pub dearness_allowance: Money,
    pub hra_received: Money,
    pub rent_paid: Money,
    #[serde(default = "default_metro")]
    pub metro: bool,
}

fn default_metro() -> bool {
    true
}

impl Default for HraInput {
    fn default() -> Self {
        HraInput {
            basic_salary: dec!(50_000),
            dearness_allowance: dec!(5_000),
            hra_received: dec!(15_000),
            rent_paid: dec!(25_000),
            metro: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HraOutput {
    pub valid: bool,
    /// Basic salary plus dearness allowance.
    pub base_salary: Money,
    pub actual_hra: Money,
    pub salary_share: Money,
    pub rent_over_threshold: Money,
    pub rent_threshold: Money,
    pub rent_exceeds_threshold: bool,
    pub exemption: Money,
    pub taxable_hra: Money,
    pub reason: String,
}

/// HRA exemption as the least of the three statutory amounts.
pub fn calculate_hra(input: &HraInput, tables: &RateTables) -> ComputationOutput<HraOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let in_range = amounts_in_range(&[
        input.basic_salary,
        input.dearness_allowance,
        input.hra_received,
        input.rent_paid,
    ]);

    let output = if !in_range {
        let reason = format!("Salary, HRA and rent must be between 0 and {MAX_AMOUNT}");
        warn!("HRA: falling back to zero result: {reason}");
        warnings.push(reason.clone());
        HraOutput {
            valid: false,
            base_salary: Decimal::ZERO,
            actual_hra: Decimal::ZERO,
            salary_share: Decimal::ZERO,
            rent_over_threshold: Decimal::ZERO,
            rent_threshold: Decimal::ZERO,
            rent_exceeds_threshold: false,
            exemption: Decimal::ZERO,
            taxable_hra: Decimal::ZERO,
            reason,
        }
    } else {
        let base = input.basic_salary + input.dearness_allowance;
        let share = if input.metro {
            tables.hra.metro_share
        } else {
            tables.hra.non_metro_share
        };
        let salary_share = base * share;
        let threshold = base * tables.hra.rent_threshold_share;
        let rent_over_threshold = (input.rent_paid - threshold).max(Decimal::ZERO);
        let exceeds = input.rent_paid > threshold;

        let (exemption, reason) = if exceeds {
            (
                input.hra_received.min(salary_share).min(rent_over_threshold),
                format!(
                    "Minimum of (Actual HRA, {}% of Base, Rent - {}% of Base)",
                    (share * dec!(100)).normalize(),
                    (tables.hra.rent_threshold_share * dec!(100)).normalize()
                ),
            )
        } else {
            (
                Decimal::ZERO,
                format!(
                    "Rent does not exceed {}% of Basic+DA. No exemption.",
                    (tables.hra.rent_threshold_share * dec!(100)).normalize()
                ),
            )
        };

        HraOutput {
            valid: true,
            base_salary: round2(base),
            actual_hra: round2(input.hra_received),
            salary_share: round2(salary_share),
            rent_over_threshold: round2(rent_over_threshold),
            rent_threshold: round2(threshold),
            rent_exceeds_threshold: exceeds,
            exemption: round2(exemption),
            taxable_hra: round2((input.hra_received - exemption).max(Decimal::ZERO)),
            reason,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "HRA exemption: min(actual HRA, salary share, rent − threshold)",
        input,
        warnings,
        elapsed,
        output,
    )
    .with_tables_version(&tables.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metro_full_exemption() {
        let out = calculate_hra(&HraInput::default(), &RateTables::default()).result;
        assert_eq!(out.base_salary, dec!(55_000));
        assert_eq!(out.salary_share, dec!(27_500));
        assert_eq!(out.rent_over_threshold, dec!(19_500));
        assert_eq!(out.exemption, dec!(15_000));
        assert_eq!(out.taxable_hra, Decimal::ZERO);
        assert_eq!(out.reason, "Minimum of (Actual HRA, 50% of Base, Rent - 10% of Base)");
    }

    #[test]
    fn test_non_metro_rent_bound() {
        let input = HraInput {
            hra_received: dec!(30_000),
            rent_paid: dec!(15_000),
            metro: false,
            ..HraInput::default()
        };
        let out = calculate_hra(&input, &RateTables::default()).result;
        // min(30,000, 22,000, 15,000 − 5,500)
        assert_eq!(out.exemption, dec!(9_500));
        assert_eq!(out.taxable_hra, dec!(20_500));
    }

    #[test]
    fn test_low_rent_no_exemption() {
        let input = HraInput {
            rent_paid: dec!(5_000),
            ..HraInput::default()
        };
        let out = calculate_hra(&input, &RateTables::default()).result;
        assert!(!out.rent_exceeds_threshold);
        assert_eq!(out.exemption, Decimal::ZERO);
        assert_eq!(out.taxable_hra, dec!(15_000));
        assert_eq!(out.reason, "Rent does not exceed 10% of Basic+DA. No exemption.");
    }
}
