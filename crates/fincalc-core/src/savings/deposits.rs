use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, CompoundGrowthInput, ScheduleRow};
use crate::types::*;

/// How often a fixed deposit credits interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    Monthly,
    #[default]
    Quarterly,
    Annual,
}

impl Compounding {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Compounding::Monthly => 12,
            Compounding::Quarterly => 4,
            Compounding::Annual => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub months: u32,
    #[serde(default)]
    pub compounding: Compounding,
}

impl Default for FdInput {
    fn default() -> Self {
        FdInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(6.5),
            months: 12,
            compounding: Compounding::Quarterly,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub maturity_amount: Money,
    pub interest: Money,
    /// Tenure in years to one decimal place.
    pub years: Decimal,
    /// Number of interest credits during the tenure.
    pub compounding_periods: u32,
    /// One row per interest credit.
    pub schedule: Vec<ScheduleRow>,
}

/// Fixed deposit maturity value.
///
/// Interest is credited `round(months / (12 / frequency))` times; a tenure
/// shorter than half a compounding period earns nothing.
pub fn calculate_fd(input: &FdInput) -> ComputationOutput<FdOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let frequency = input.compounding.periods_per_year();
    let periods = (Decimal::from(input.months) * Decimal::from(frequency) / dec!(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);
    let years = (Decimal::from(input.months) / dec!(12))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    let output = if periods == 0 && input.principal > Decimal::ZERO {
        warnings.push("Tenure is shorter than one compounding period; no interest credited".into());
        FdOutput {
            valid: true,
            message: None,
            maturity_amount: round2(input.principal),
            interest: Decimal::ZERO,
            years,
            compounding_periods: 0,
            schedule: Vec::new(),
        }
    } else {
        match amortization::compute_compound_growth(&CompoundGrowthInput {
            principal: input.principal,
            annual_rate_percent: input.annual_rate_percent,
            periods,
            periods_per_year: frequency,
            start_date: None,
        }) {
            Ok(computed) => FdOutput {
                valid: true,
                message: None,
                maturity_amount: computed.result.future_value,
                interest: computed.result.total_gain,
                years,
                compounding_periods: periods,
                schedule: computed.result.schedule,
            },
            Err(e) => {
                warn!("FD: falling back to zero result: {e}");
                warnings.push(e.to_string());
                FdOutput {
                    valid: false,
                    message: Some("Enter a positive deposit amount and a non-negative rate".into()),
                    maturity_amount: Decimal::ZERO,
                    interest: Decimal::ZERO,
                    years,
                    compounding_periods: periods,
                    schedule: Vec::new(),
                }
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Fixed deposit maturity (A = P·(1 + r/n)^periods)",
        input,
        warnings,
        elapsed,
        output,
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpsumInput {
    pub investment_amount: Money,
    pub annual_return_percent: Percent,
    pub years: u32,
}

impl Default for LumpsumInput {
    fn default() -> Self {
        LumpsumInput {
            investment_amount: dec!(500_000),
            annual_return_percent: dec!(12),
            years: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpsumYear {
    pub year: u32,
    pub value: Money,
    /// Cumulative gain over the original investment.
    pub gains: Money,
    pub return_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpsumOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub future_value: Money,
    pub gains: Money,
    pub total_return_percent: Decimal,
    pub yearly: Vec<LumpsumYear>,
}

fn return_percent(gain: Money, invested: Money) -> Decimal {
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    round2(gain / invested * dec!(100))
}

/// One-time investment compounded annually.
pub fn calculate_lumpsum(input: &LumpsumInput) -> ComputationOutput<LumpsumOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = match amortization::compute_compound_growth(&CompoundGrowthInput {
        principal: input.investment_amount,
        annual_rate_percent: input.annual_return_percent,
        periods: input.years,
        periods_per_year: 1,
        start_date: None,
    }) {
        Ok(computed) => {
            let invested = input.investment_amount;
            let yearly = computed
                .result
                .schedule
                .iter()
                .map(|row| LumpsumYear {
                    year: row.period,
                    value: row.ending_balance,
                    gains: row.ending_balance - invested,
                    return_percent: return_percent(row.ending_balance - invested, invested),
                })
                .collect();
            LumpsumOutput {
                valid: true,
                message: None,
                future_value: computed.result.future_value,
                gains: computed.result.total_gain,
                total_return_percent: return_percent(computed.result.total_gain, invested),
                yearly,
            }
        }
        Err(e) => {
            warn!("Lumpsum: falling back to zero result: {e}");
            warnings.push(e.to_string());
            LumpsumOutput {
                valid: false,
                message: Some("Enter a positive amount and investment period".into()),
                future_value: Decimal::ZERO,
                gains: Decimal::ZERO,
                total_return_percent: Decimal::ZERO,
                yearly: Vec::new(),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Lumpsum growth (FV = P·(1+r)^t, annual compounding)",
        input,
        warnings,
        elapsed,
        output,
    )
}
