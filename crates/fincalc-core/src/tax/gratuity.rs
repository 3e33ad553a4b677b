use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::format::format_inr;
use crate::tables::RateTables;
use crate::time_value::{amounts_in_range, MAX_AMOUNT};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GratuityInput {
    pub basic_salary: Money,
    #[serde(default)]
    pub dearness_allowance: Money,
    pub years_of_service: u32,
    /// Overrides basic + DA when positive.
    #[serde(default)]
    pub last_month_salary: Money,
}

impl Default for GratuityInput {
    fn default() -> Self {
        GratuityInput {
            basic_salary: dec!(50_000),
            dearness_allowance: dec!(5_000),
            years_of_service: 10,
            last_month_salary: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GratuityOutput {
    pub eligible: bool,
    pub message: String,
    pub years_of_service: u32,
    pub years_pending: u32,
    pub last_salary: Money,
    pub salary_for_26_days: Money,
    pub uncapped_gratuity: Money,
    pub gratuity: Money,
    pub capped: bool,
}

/// Gratuity = last drawn salary / 26 × completed years, up to the ceiling.
pub fn calculate_gratuity(
    input: &GratuityInput,
    tables: &RateTables,
) -> ComputationOutput<GratuityOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let rules = &tables.gratuity;

    let years = input.years_of_service;
    let ineligible = |message: String| GratuityOutput {
        eligible: false,
        message,
        years_of_service: years,
        years_pending: rules.min_service_years.saturating_sub(years),
        last_salary: Decimal::ZERO,
        salary_for_26_days: Decimal::ZERO,
        uncapped_gratuity: Decimal::ZERO,
        gratuity: Decimal::ZERO,
        capped: false,
    };

    let salaries = [
        input.basic_salary,
        input.dearness_allowance,
        input.last_month_salary,
    ];
    let output = if !amounts_in_range(&salaries) {
        let reason = format!("Salary figures must be between 0 and {MAX_AMOUNT}");
        warn!("Gratuity: falling back to zero result: {reason}");
        warnings.push(reason.clone());
        ineligible(reason)
    } else if years < rules.min_service_years {
        ineligible(format!(
            "Not eligible - Gratuity available after {} years of service",
            rules.min_service_years
        ))
    } else {
        let last = if input.last_month_salary > Decimal::ZERO {
            input.last_month_salary
        } else {
            input.basic_salary + input.dearness_allowance
        };
        let per_day = last / rules.days_divisor;
        let uncapped = per_day * Decimal::from(years);
        let capped = uncapped > rules.ceiling;
        GratuityOutput {
            eligible: true,
            message: if capped {
                format!("Capped at {}", format_inr(rules.ceiling))
            } else {
                "Fully eligible".into()
            },
            years_of_service: years,
            years_pending: 0,
            last_salary: round2(last),
            salary_for_26_days: round2(per_day),
            uncapped_gratuity: round2(uncapped),
            gratuity: round2(uncapped.min(rules.ceiling)),
            capped,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Gratuity (last salary / 26 × years of service, capped)",
        input,
        warnings,
        elapsed,
        output,
    )
    .with_tables_version(&tables.version)
}
