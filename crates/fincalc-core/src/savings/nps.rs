use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{investment_years, InvestmentYear};
use crate::amortization::{self, AccumulationInput};
use crate::error::FinCalcError;
use crate::tables::RateTables;
use crate::time_value::AnnuityTiming;
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpsInput {
    pub monthly_contribution: Money,
    pub current_age: u32,
    pub retirement_age: u32,
    pub expected_return_percent: Percent,
}

impl Default for NpsInput {
    fn default() -> Self {
        NpsInput {
            monthly_contribution: dec!(5_000),
            current_age: 30,
            retirement_age: 60,
            expected_return_percent: dec!(8),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpsOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub years_to_retirement: u32,
    pub corpus: Money,
    pub total_contributed: Money,
    pub gains: Money,
    pub lumpsum_withdrawal: Money,
    pub annuity_amount: Money,
    pub monthly_pension: Money,
    pub annual_pension: Money,
    /// Year-end balances labelled by the subscriber's age.
    pub yearly: Vec<InvestmentYear>,
}

/// NPS corpus at retirement and the pension bought with its annuity share.
pub fn calculate_nps(input: &NpsInput, tables: &RateTables) -> ComputationOutput<NpsOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let years = input.retirement_age.saturating_sub(input.current_age);
    let computed = if input.retirement_age <= input.current_age {
        Err(FinCalcError::invalid(
            "retirement_age",
            "Retirement age must be greater than current age",
        ))
    } else {
        years
            .checked_mul(12)
            .ok_or_else(|| {
                FinCalcError::invalid("retirement_age", "Years to retirement is too long")
            })
            .and_then(|periods| {
                amortization::compute_accumulation(&AccumulationInput {
                    contribution: input.monthly_contribution,
                    annual_rate_percent: input.expected_return_percent,
                    periods,
                    periods_per_year: 12,
                    timing: AnnuityTiming::End,
                    start_date: None,
                })
            })
            .map(|o| o.result)
    };
    let first_age = i32::try_from(input.current_age)
        .unwrap_or(i32::MAX)
        .saturating_add(1);

    let output = match computed {
        Ok(plan) => {
            let corpus = plan.future_value;
            let annuity_amount = corpus * tables.nps.annuity_share;
            let monthly_pension = annuity_amount * tables.nps.annuity_rate / dec!(12);
            NpsOutput {
                valid: true,
                message: None,
                years_to_retirement: years,
                corpus,
                total_contributed: plan.total_contributed,
                gains: plan.total_gain,
                lumpsum_withdrawal: round2(corpus * tables.nps.lumpsum_share),
                annuity_amount: round2(annuity_amount),
                monthly_pension: round2(monthly_pension),
                annual_pension: round2(monthly_pension * dec!(12)),
                yearly: investment_years(&plan.schedule, 12, first_age),
            }
        }
        Err(e) => {
            warn!("NPS: falling back to zero result: {e}");
            warnings.push(e.to_string());
            NpsOutput {
                valid: false,
                message: Some(e.to_string()),
                years_to_retirement: years,
                corpus: Decimal::ZERO,
                total_contributed: Decimal::ZERO,
                gains: Decimal::ZERO,
                lumpsum_withdrawal: Decimal::ZERO,
                annuity_amount: Decimal::ZERO,
                monthly_pension: Decimal::ZERO,
                annual_pension: Decimal::ZERO,
                yearly: Vec::new(),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "NPS corpus (monthly annuity) with lumpsum/annuity split",
        &serde_json::json!({
            "input": input,
            "lumpsum_share": tables.nps.lumpsum_share.to_string(),
            "annuity_share": tables.nps.annuity_share.to_string(),
            "annuity_rate": tables.nps.annuity_rate.to_string(),
        }),
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
    fn test_nps_split_and_pension() {
        let out = calculate_nps(&NpsInput::default(), &RateTables::default()).result;
        assert!(out.valid);
        assert_eq!(out.years_to_retirement, 30);
        assert_eq!(out.total_contributed, dec!(1_800_000));
        assert_eq!(out.yearly.len(), 30);
        assert_eq!(out.yearly[0].year, 31);
        assert_eq!(out.yearly[29].year, 60);
        assert_eq!(out.lumpsum_withdrawal + out.annuity_amount, out.corpus);
        // Pension is 6% a year on the annuity share
        assert!((out.annual_pension - out.annuity_amount * dec!(0.06)).abs() <= dec!(0.01));
    }

    #[test]
    fn test_retirement_before_current_age() {
        let input = NpsInput {
            current_age: 60,
            retirement_age: 55,
            ..NpsInput::default()
        };
        let out = calculate_nps(&input, &RateTables::default()).result;
        assert!(!out.valid);
        assert_eq!(out.corpus, Decimal::ZERO);
        assert_eq!(out.years_to_retirement, 0);
    }

    #[test]
    fn test_implausible_retirement_age_is_zero_result() {
        let input = NpsInput {
            retirement_age: 400_000_000,
            ..NpsInput::default()
        };
        let out = calculate_nps(&input, &RateTables::default());
        assert!(!out.result.valid);
        assert_eq!(out.result.corpus, Decimal::ZERO);
        assert!(out.result.yearly.is_empty());
        assert_eq!(out.warnings.len(), 1);

        let input = NpsInput {
            current_age: 0,
            retirement_age: u32::MAX,
            ..NpsInput::default()
        };
        assert!(!calculate_nps(&input, &RateTables::default()).result.valid);
    }
}
