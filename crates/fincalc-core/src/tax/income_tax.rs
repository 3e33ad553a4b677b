use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{slab_tax, SlabTax};
use crate::tables::RateTables;
use crate::time_value::{amounts_in_range, MAX_AMOUNT};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub gross_income: Money,
    #[serde(default)]
    pub section_80c: Money,
    #[serde(default)]
    pub section_80d: Money,
    #[serde(default)]
    pub section_80e: Money,
    #[serde(default)]
    pub section_80ccd_1b: Money,
    pub age: u32,
}

impl Default for IncomeTaxInput {
    fn default() -> Self {
        IncomeTaxInput {
            gross_income: dec!(1_000_000),
            section_80c: dec!(150_000),
            section_80d: dec!(25_000),
            section_80e: Decimal::ZERO,
            section_80ccd_1b: Decimal::ZERO,
            age: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub slab_table: String,
    pub total_deductions: Money,
    pub taxable_income: Money,
    pub tax: Money,
    pub cess: Money,
    pub total_tax: Money,
    /// Total tax as a percentage of gross income, 2 dp.
    pub effective_rate_percent: Decimal,
    pub slabs: Vec<SlabTax>,
}

/// Old-regime income tax with capped deductions and an age-based slab table.
pub fn calculate_income_tax(
    input: &IncomeTaxInput,
    tables: &RateTables,
) -> ComputationOutput<IncomeTaxOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let rules = &tables.income_tax;

    let out_of_range = !amounts_in_range(&[
        input.gross_income,
        input.section_80c,
        input.section_80d,
        input.section_80e,
        input.section_80ccd_1b,
    ]);

    let output = match tables.slab_for_age(input.age) {
        Some(table) if !out_of_range => {
            let c80 = input.section_80c.min(rules.cap_80c);
            let ccd = input.section_80ccd_1b.min(rules.cap_80ccd_1b);
            if c80 < input.section_80c {
                warnings.push(format!("Section 80C capped at {}", rules.cap_80c));
            }
            if ccd < input.section_80ccd_1b {
                warnings.push(format!("Section 80CCD(1B) capped at {}", rules.cap_80ccd_1b));
            }
            let deductions = c80 + input.section_80d + input.section_80e + ccd;
            let taxable = (input.gross_income - deductions).max(Decimal::ZERO);

            let (tax, slabs) = slab_tax(taxable, table);
            // Levied on gross income, and only above the threshold.
            let cess = if taxable > rules.cess_threshold {
                input.gross_income * rules.cess_rate
            } else {
                Decimal::ZERO
            };
            let total = tax + cess;
            let effective = if input.gross_income > Decimal::ZERO {
                round2(total / input.gross_income * dec!(100))
            } else {
                Decimal::ZERO
            };

            IncomeTaxOutput {
                valid: true,
                message: None,
                slab_table: table.label.clone(),
                total_deductions: round2(deductions),
                taxable_income: round2(taxable),
                tax: round2(tax),
                cess: round2(cess),
                total_tax: round2(total),
                effective_rate_percent: effective,
                slabs,
            }
        }
        _ => {
            let reason = if out_of_range {
                format!("Income and deductions must be between 0 and {MAX_AMOUNT}")
            } else {
                "No slab table covers this age".to_string()
            };
            warn!("Income tax: falling back to zero result: {reason}");
            warnings.push(reason.clone());
            IncomeTaxOutput {
                valid: false,
                message: Some(reason),
                slab_table: String::new(),
                total_deductions: Decimal::ZERO,
                taxable_income: Decimal::ZERO,
                tax: Decimal::ZERO,
                cess: Decimal::ZERO,
                total_tax: Decimal::ZERO,
                effective_rate_percent: Decimal::ZERO,
                slabs: Vec::new(),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Progressive slab tax on income after 80C/80D/80E/80CCD(1B) deductions",
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
    fn test_default_taxpayer() {
        let out = calculate_income_tax(&IncomeTaxInput::default(), &RateTables::default()).result;
        assert_eq!(out.total_deductions, dec!(175_000));
        assert_eq!(out.taxable_income, dec!(825_000));
        assert_eq!(out.tax, dec!(77_500));
        assert_eq!(out.cess, Decimal::ZERO);
        assert_eq!(out.effective_rate_percent, dec!(7.75));
    }

    #[test]
    fn test_cess_on_gross_above_ten_lakh() {
        let input = IncomeTaxInput {
            gross_income: dec!(2_000_000),
            section_80c: Decimal::ZERO,
            section_80d: Decimal::ZERO,
            ..IncomeTaxInput::default()
        };
        let out = calculate_income_tax(&input, &RateTables::default()).result;
        assert_eq!(out.tax, dec!(412_500));
        assert_eq!(out.cess, dec!(80_000));
        assert_eq!(out.total_tax, dec!(492_500));
        assert_eq!(out.effective_rate_percent, dec!(24.63));
    }

    #[test]
    fn test_senior_and_super_senior_tables() {
        let mut input = IncomeTaxInput {
            gross_income: dec!(600_000),
            section_80c: Decimal::ZERO,
            section_80d: Decimal::ZERO,
            age: 65,
            ..IncomeTaxInput::default()
        };
        let tables = RateTables::default();
        assert_eq!(calculate_income_tax(&input, &tables).result.tax, dec!(30_000));
        input.age = 85;
        assert_eq!(calculate_income_tax(&input, &tables).result.tax, dec!(20_000));
    }

    #[test]
    fn test_deduction_caps_warn() {
        let input = IncomeTaxInput {
            section_80c: dec!(200_000),
            section_80ccd_1b: dec!(80_000),
            ..IncomeTaxInput::default()
        };
        let out = calculate_income_tax(&input, &RateTables::default());
        assert_eq!(out.result.total_deductions, dec!(225_000));
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_zero_income_has_zero_rate() {
        let input = IncomeTaxInput {
            gross_income: Decimal::ZERO,
            ..IncomeTaxInput::default()
        };
        let out = calculate_income_tax(&input, &RateTables::default()).result;
        assert!(out.valid);
        assert_eq!(out.total_tax, Decimal::ZERO);
        assert_eq!(out.effective_rate_percent, Decimal::ZERO);
    }
}
