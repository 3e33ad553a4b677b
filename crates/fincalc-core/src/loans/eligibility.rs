use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::tables::RateTables;
use crate::time_value;
use crate::types::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    Salaried,
    SelfEmployed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub monthly_income: Money,
    pub existing_emi: Money,
    #[serde(default)]
    pub employment_type: EmploymentType,
    pub tenure_years: u32,
    pub annual_rate_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutput {
    pub eligible: bool,
    /// Largest loan the available EMI services, floored to a whole rupee.
    pub max_eligible_loan: Money,
    pub max_allowed_emi: Money,
    pub available_emi: Money,
    pub monthly_emi: Money,
    pub message: String,
}

/// Maximum loan a borrower qualifies for given income and existing EMIs.
pub fn calculate_loan_eligibility(
    input: &EligibilityInput,
    tables: &RateTables,
) -> ComputationOutput<EligibilityOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let ratio = match input.employment_type {
        EmploymentType::Salaried => tables.eligibility.salaried_emi_ratio,
        EmploymentType::SelfEmployed => tables.eligibility.self_employed_emi_ratio,
    };
    let output = if !time_value::amounts_in_range(&[input.monthly_income, input.existing_emi]) {
        let reason = format!(
            "Monthly income and existing EMI must be between 0 and {}",
            time_value::MAX_AMOUNT
        );
        warn!("loan eligibility: falling back to zero result: {reason}");
        warnings.push(reason);
        EligibilityOutput {
            eligible: false,
            max_eligible_loan: Decimal::ZERO,
            max_allowed_emi: Decimal::ZERO,
            available_emi: Decimal::ZERO,
            monthly_emi: Decimal::ZERO,
            message: "Enter a monthly income and existing EMI within the supported range.".into(),
        }
    } else {
        let max_allowed_emi = input.monthly_income * ratio;
        let available_emi = max_allowed_emi - input.existing_emi;
        if available_emi <= Decimal::ZERO {
            EligibilityOutput {
                eligible: false,
                max_eligible_loan: Decimal::ZERO,
                max_allowed_emi: round2(max_allowed_emi),
                available_emi: round2(available_emi),
                monthly_emi: Decimal::ZERO,
                message: "Your existing EMI exceeds maximum allowed EMI capacity.".into(),
            }
        } else {
            let rate = time_value::periodic_rate(input.annual_rate_percent, 12);
            let months = input.tenure_years.saturating_mul(12);
            match time_value::annuity_present_value(available_emi, rate, months) {
                Ok(loan) => EligibilityOutput {
                    eligible: true,
                    max_eligible_loan: loan.floor(),
                    max_allowed_emi: round2(max_allowed_emi),
                    available_emi: round2(available_emi),
                    monthly_emi: round2(available_emi),
                    message: "Based on income and existing obligations.".into(),
                },
                Err(e) => {
                    warn!("loan eligibility: falling back to zero result: {e}");
                    warnings.push(e.to_string());
                    EligibilityOutput {
                        eligible: false,
                        max_eligible_loan: Decimal::ZERO,
                        max_allowed_emi: round2(max_allowed_emi),
                        available_emi: round2(available_emi),
                        monthly_emi: Decimal::ZERO,
                        message: "Enter a tenure of 1 to 100 years and a non-negative interest rate."
                            .into(),
                    }
                }
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Loan eligibility (FOIR cap, present value of available EMI)",
        &serde_json::json!({
            "emi_ratio": ratio.to_string(),
            "tenure_years": input.tenure_years,
            "annual_rate_percent": input.annual_rate_percent.to_string(),
        }),
        warnings,
        elapsed,
        output,
    )
    .with_tables_version(&tables.version)
}
