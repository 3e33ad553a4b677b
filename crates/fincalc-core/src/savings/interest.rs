use log::warn;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, summarize_by_year, CompoundGrowthInput};
use crate::query::{QueryParams, ShareLink};
use crate::time_value::{MAX_AMOUNT, MAX_YEARS};
use crate::types::*;

// ---------------------------------------------------------------------------
// Compound interest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub years: u32,
    /// Compounding periods per year.
    pub frequency: u32,
}

impl Default for CompoundInterestInput {
    fn default() -> Self {
        CompoundInterestInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(8),
            years: 5,
            frequency: 1,
        }
    }
}

impl CompoundInterestInput {
    /// Read `principal`, `rate`, `years` and `frequency` from a share link.
    pub fn from_query(query: &QueryParams) -> Self {
        let d = CompoundInterestInput::default();
        CompoundInterestInput {
            principal: query.number_or("principal", d.principal),
            annual_rate_percent: query.number_or("rate", d.annual_rate_percent),
            years: query.count_or("years", d.years),
            frequency: query.count_or("frequency", d.frequency),
        }
    }

    pub fn share_link(&self) -> ShareLink {
        ShareLink::CompoundInterest {
            principal: self.principal,
            rate: self.annual_rate_percent,
            years: self.years,
            frequency: self.frequency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestYear {
    pub year: i32,
    pub interest_earned: Money,
    pub total_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total_amount: Money,
    pub compound_interest: Money,
    /// Interest of the equivalent steady monthly rate in the first month.
    pub avg_monthly_interest: Money,
    pub yearly: Vec<CompoundInterestYear>,
}

impl CompoundInterestOutput {
    fn zero(message: &str) -> Self {
        CompoundInterestOutput {
            valid: false,
            message: Some(message.into()),
            total_amount: Decimal::ZERO,
            compound_interest: Decimal::ZERO,
            avg_monthly_interest: Decimal::ZERO,
            yearly: Vec::new(),
        }
    }
}

/// `P·((A/P)^(1/(12t)) − 1)`: the monthly interest a constant monthly rate
/// reaching the same maturity would pay on the principal.
fn average_monthly_interest(principal: Money, total: Money, years: u32) -> Money {
    let months = Decimal::from(years) * dec!(12);
    let monthly_factor = (total / principal).checked_powd(Decimal::ONE / months);
    match monthly_factor {
        Some(f) => round2(principal * (f - Decimal::ONE)),
        None => Decimal::ZERO,
    }
}

/// Compound interest `P·(1 + r/n)^(n·t)` with a year-wise breakdown.
///
/// Any non-positive input, including a zero rate, yields the zero result.
pub fn calculate_compound_interest(
    input: &CompoundInterestInput,
) -> ComputationOutput<CompoundInterestOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = if input.principal <= Decimal::ZERO
        || input.annual_rate_percent <= Decimal::ZERO
        || input.frequency == 0
        || input.years == 0
    {
        let reason = "Principal, rate, years and frequency must all be positive";
        warn!("Compound interest: falling back to zero result: {reason}");
        warnings.push(reason.into());
        CompoundInterestOutput::zero("Enter positive values for every field")
    } else {
        let computed = amortization::compute_compound_growth(&CompoundGrowthInput {
            principal: input.principal,
            annual_rate_percent: input.annual_rate_percent,
            periods: input.years.saturating_mul(input.frequency),
            periods_per_year: input.frequency,
            start_date: None,
        });
        match computed {
            Ok(out) => {
                let growth = out.result;
                let yearly = summarize_by_year(&growth.schedule, input.frequency)
                    .into_iter()
                    .map(|y| CompoundInterestYear {
                        year: y.year,
                        interest_earned: y.interest_component,
                        total_amount: y.ending_balance,
                    })
                    .collect();
                CompoundInterestOutput {
                    valid: true,
                    message: None,
                    avg_monthly_interest: average_monthly_interest(
                        input.principal,
                        growth.future_value,
                        input.years,
                    ),
                    total_amount: growth.future_value,
                    compound_interest: growth.total_gain,
                    yearly,
                }
            }
            Err(e) => {
                warn!("Compound interest: falling back to zero result: {e}");
                warnings.push(e.to_string());
                CompoundInterestOutput::zero("Inputs are outside the supported range")
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Compound interest (A = P·(1 + r/n)^(n·t))",
        input,
        warnings,
        elapsed,
        output,
    )
}

// ---------------------------------------------------------------------------
// Simple interest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub years: u32,
}

impl Default for SimpleInterestInput {
    fn default() -> Self {
        SimpleInterestInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(8),
            years: 5,
        }
    }
}

impl SimpleInterestInput {
    /// Read `principal`, `rate` and `years` from a share link.
    pub fn from_query(query: &QueryParams) -> Self {
        let d = SimpleInterestInput::default();
        SimpleInterestInput {
            principal: query.number_or("principal", d.principal),
            annual_rate_percent: query.number_or("rate", d.annual_rate_percent),
            years: query.count_or("years", d.years),
        }
    }

    pub fn share_link(&self) -> ShareLink {
        ShareLink::SimpleInterest {
            principal: self.principal,
            rate: self.annual_rate_percent,
            years: self.years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestYear {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub total_paid: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub simple_interest: Money,
    pub total_amount: Money,
    pub monthly_interest: Money,
    pub yearly: Vec<SimpleInterestYear>,
}

/// Simple interest `P·R·T / 100`; every year earns the same interest.
pub fn calculate_simple_interest(
    input: &SimpleInterestInput,
) -> ComputationOutput<SimpleInterestOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let p = input.principal;
    let annual_interest = if p < Decimal::ZERO
        || p > MAX_AMOUNT
        || input.annual_rate_percent < Decimal::ZERO
        || input.years > MAX_YEARS
    {
        None
    } else {
        p.checked_mul(input.annual_rate_percent)
            .map(|v| v / dec!(100))
    };
    let total_interest =
        annual_interest.and_then(|a| a.checked_mul(Decimal::from(input.years)));

    let output = match (annual_interest, total_interest) {
        (Some(annual), Some(si)) => {
            let monthly = if input.years == 0 {
                Decimal::ZERO
            } else {
                si / (Decimal::from(input.years) * dec!(12))
            };
            let annual = round2(annual);
            let yearly = (1..=input.years)
                .map(|year| SimpleInterestYear {
                    year,
                    principal_paid: Decimal::ZERO,
                    interest_paid: annual,
                    total_paid: annual,
                    ending_balance: round2(p),
                })
                .collect();
            SimpleInterestOutput {
                valid: true,
                message: None,
                simple_interest: round2(si),
                total_amount: round2(p + si),
                monthly_interest: round2(monthly),
                yearly,
            }
        }
        _ => {
            let reason = if input.years > MAX_YEARS {
                format!("Time period must not exceed {MAX_YEARS} years")
            } else {
                "Principal and rate must be non-negative and within range".to_string()
            };
            warn!("Simple interest: falling back to zero result: {reason}");
            warnings.push(reason.clone());
            SimpleInterestOutput {
                valid: false,
                message: Some(reason),
                simple_interest: Decimal::ZERO,
                total_amount: Decimal::ZERO,
                monthly_interest: Decimal::ZERO,
                yearly: Vec::new(),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Simple interest (SI = P·R·T/100)",
        input,
        warnings,
        elapsed,
        output,
    )
}
