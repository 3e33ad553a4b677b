use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{investment_years, InvestmentYear};
use crate::amortization::{self, AccumulationInput, AccumulationOutput};
use crate::error::FinCalcError;
use crate::time_value::AnnuityTiming;
use crate::types::*;
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly systematic investment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_amount: Money,
    pub annual_return_percent: Percent,
    pub years: u32,
}

impl Default for SipInput {
    fn default() -> Self {
        SipInput {
            monthly_amount: dec!(10_000),
            annual_return_percent: dec!(12),
            years: 10,
        }
    }
}

/// Recurring deposit: monthly deposits credited at the start of each month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdInput {
    pub monthly_deposit: Money,
    pub annual_rate_percent: Percent,
    pub months: u32,
}

impl Default for RdInput {
    fn default() -> Self {
        RdInput {
            monthly_deposit: dec!(5_000),
            annual_rate_percent: dec!(5.5),
            months: 60,
        }
    }
}

/// Public Provident Fund: one deposit a year, compounded annually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    pub annual_deposit: Money,
    pub annual_rate_percent: Percent,
    pub years: u32,
}

impl Default for PpfInput {
    fn default() -> Self {
        PpfInput {
            annual_deposit: dec!(150_000),
            annual_rate_percent: dec!(7.1),
            years: 15,
        }
    }
}

/// Shared result shape for SIP, RD and PPF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulationPlanOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub maturity_amount: Money,
    pub total_invested: Money,
    pub total_gain: Money,
    pub yearly: Vec<InvestmentYear>,
}

impl AccumulationPlanOutput {
    fn zero(message: &str) -> Self {
        AccumulationPlanOutput {
            valid: false,
            message: Some(message.into()),
            maturity_amount: Decimal::ZERO,
            total_invested: Decimal::ZERO,
            total_gain: Decimal::ZERO,
            yearly: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

fn run_plan(
    name: &str,
    input: AccumulationInput,
    warnings: &mut Vec<String>,
) -> AccumulationPlanOutput {
    let periods_per_year = input.periods_per_year;
    let computed: FinCalcResult<AccumulationOutput> =
        amortization::compute_accumulation(&input).map(|o| o.result);

    match computed {
        Ok(plan) => AccumulationPlanOutput {
            valid: true,
            message: None,
            maturity_amount: plan.future_value,
            total_invested: plan.total_contributed,
            total_gain: plan.total_gain,
            yearly: investment_years(&plan.schedule, periods_per_year, 1),
        },
        Err(e) => {
            warn!("{name}: falling back to zero result: {e}");
            let message = match &e {
                FinCalcError::InvalidInput { field, .. } if field == "periods" => {
                    "Enter an investment period of at least one instalment"
                }
                _ => "Enter a positive amount and a non-negative rate",
            };
            warnings.push(e.to_string());
            AccumulationPlanOutput::zero(message)
        }
    }
}

/// Future value of a monthly SIP (ordinary annuity) with a yearly summary.
pub fn calculate_sip(input: &SipInput) -> ComputationOutput<AccumulationPlanOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = run_plan(
        "SIP",
        AccumulationInput {
            contribution: input.monthly_amount,
            annual_rate_percent: input.annual_return_percent,
            periods: input.years.saturating_mul(12),
            periods_per_year: 12,
            timing: AnnuityTiming::End,
            start_date: None,
        },
        &mut warnings,
    );

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "SIP future value (FV = P·((1+r)^n − 1)/r)",
        input,
        warnings,
        elapsed,
        output,
    )
}

/// Recurring deposit maturity (annuity-due, monthly compounding).
pub fn calculate_rd(input: &RdInput) -> ComputationOutput<AccumulationPlanOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = run_plan(
        "RD",
        AccumulationInput {
            contribution: input.monthly_deposit,
            annual_rate_percent: input.annual_rate_percent,
            periods: input.months,
            periods_per_year: 12,
            timing: AnnuityTiming::Beginning,
            start_date: None,
        },
        &mut warnings,
    );

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Recurring deposit maturity (FV = P·((1+r)^n − 1)/r·(1+r))",
        input,
        warnings,
        elapsed,
        output,
    )
}

/// PPF maturity with annual deposits and annual compounding.
pub fn calculate_ppf(input: &PpfInput) -> ComputationOutput<AccumulationPlanOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = run_plan(
        "PPF",
        AccumulationInput {
            contribution: input.annual_deposit,
            annual_rate_percent: input.annual_rate_percent,
            periods: input.years,
            periods_per_year: 1,
            timing: AnnuityTiming::End,
            start_date: None,
        },
        &mut warnings,
    );

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "PPF maturity (annual deposit, annual compounding)",
        input,
        warnings,
        elapsed,
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sip_defaults() {
        let out = calculate_sip(&SipInput::default()).result;
        assert!(out.valid);
        assert_eq!(out.maturity_amount, dec!(2300386.89));
        assert_eq!(out.total_invested, dec!(1_200_000));
        assert_eq!(out.yearly.len(), 10);
        assert_eq!(out.yearly[0].invested, dec!(120_000));
        assert_eq!(out.yearly[9].total_invested, dec!(1_200_000));
    }

    #[test]
    fn test_ppf_first_year_has_no_interest() {
        let out = calculate_ppf(&PpfInput::default()).result;
        assert_eq!(out.yearly[0].balance, dec!(150_000));
        assert_eq!(out.yearly[0].growth, Decimal::ZERO);
        // Year 2: 150,000 × 1.071 + 150,000
        assert_eq!(out.yearly[1].balance, dec!(310_650));
        assert_eq!(out.yearly.len(), 15);
    }

    #[test]
    fn test_rd_is_annuity_due() {
        let input = RdInput {
            monthly_deposit: dec!(1000),
            annual_rate_percent: dec!(12),
            months: 1,
        };
        let out = calculate_rd(&input).result;
        assert_eq!(out.maturity_amount, dec!(1010));
        assert_eq!(out.total_gain, dec!(10));
    }

    #[test]
    fn test_zero_years_is_not_valid() {
        let input = SipInput {
            years: 0,
            ..SipInput::default()
        };
        let out = calculate_sip(&input);
        assert!(!out.result.valid);
        assert_eq!(out.result.maturity_amount, Decimal::ZERO);
        assert_eq!(
            out.result.message.as_deref(),
            Some("Enter an investment period of at least one instalment")
        );
    }
}
