use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::slab_tax;
use crate::tables::RateTables;
use crate::time_value::{amounts_in_range, percents_in_range, MAX_AMOUNT};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryInput {
    pub ctc: Money,
    pub basic_percent: Percent,
    pub da_percent: Percent,
    pub hra_percent: Percent,
    #[serde(default)]
    pub other_allowances: Money,
    /// State for professional tax, e.g. "delhi" or "Tamil Nadu".
    #[serde(default)]
    pub state: String,
}

impl Default for SalaryInput {
    fn default() -> Self {
        SalaryInput {
            ctc: dec!(1_000_000),
            basic_percent: dec!(40),
            da_percent: dec!(10),
            hra_percent: dec!(20),
            other_allowances: dec!(100_000),
            state: "delhi".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub basic: Money,
    pub dearness_allowance: Money,
    pub hra: Money,
    pub other_allowances: Money,
    pub gross_salary: Money,
    pub epf: Money,
    pub professional_tax: Money,
    pub income_tax: Money,
    pub total_deductions: Money,
    pub annual_in_hand: Money,
    pub monthly_in_hand: Money,
}

fn state_key(state: &str) -> String {
    state
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// CTC to in-hand pay after EPF, professional tax and slab income tax.
///
/// Tax uses the youngest slab table with no cess or deductions beyond EPF.
pub fn calculate_salary(input: &SalaryInput, tables: &RateTables) -> ComputationOutput<SalaryOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let out_of_range = !amounts_in_range(&[input.ctc, input.other_allowances])
        || !percents_in_range(&[input.basic_percent, input.da_percent, input.hra_percent]);

    let output = match tables.slab_for_age(0) {
        Some(table) if !out_of_range => {
            let basic = input.ctc * input.basic_percent / dec!(100);
            let da = basic * input.da_percent / dec!(100);
            let hra = basic * input.hra_percent / dec!(100);
            let gross = basic + da + hra + input.other_allowances;
            if gross > input.ctc {
                warnings.push("Gross salary exceeds CTC; check the component percentages".into());
            }

            let epf = basic * tables.payroll.epf_rate;
            let pt = tables
                .payroll
                .professional_tax
                .get(&state_key(&input.state))
                .copied()
                .unwrap_or(tables.payroll.default_professional_tax);
            let (tax, _) = slab_tax((gross - epf).max(Decimal::ZERO), table);

            let deductions = epf + pt + tax;
            let annual = gross - deductions;
            SalaryOutput {
                valid: true,
                message: None,
                basic: round2(basic),
                dearness_allowance: round2(da),
                hra: round2(hra),
                other_allowances: round2(input.other_allowances),
                gross_salary: round2(gross),
                epf: round2(epf),
                professional_tax: round2(pt),
                income_tax: round2(tax),
                total_deductions: round2(deductions),
                annual_in_hand: round2(annual),
                monthly_in_hand: round2(annual / dec!(12)),
            }
        }
        _ => {
            let reason = if out_of_range {
                format!(
                    "CTC and allowances must be between 0 and {MAX_AMOUNT}, percentages between 0 and 100"
                )
            } else {
                "No slab table applies from age 0".to_string()
            };
            warn!("Salary: falling back to zero result: {reason}");
            warnings.push(reason.clone());
            SalaryOutput {
                valid: false,
                message: Some(reason),
                basic: Decimal::ZERO,
                dearness_allowance: Decimal::ZERO,
                hra: Decimal::ZERO,
                other_allowances: Decimal::ZERO,
                gross_salary: Decimal::ZERO,
                epf: Decimal::ZERO,
                professional_tax: Decimal::ZERO,
                income_tax: Decimal::ZERO,
                total_deductions: Decimal::ZERO,
                annual_in_hand: Decimal::ZERO,
                monthly_in_hand: Decimal::ZERO,
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "CTC breakdown: gross − (EPF + professional tax + slab income tax)",
        input,
        warnings,
        elapsed,
        output,
    )
    .with_tables_version(&tables.version)
}
