//! Period-by-period loan and investment schedules.
//!
//! The three contract operations share one stepping function
//! ([`schedule::generate_schedule`]) selected by [`ScheduleMode`]; the
//! per-product calculators in `loans` and `savings` are thin adapters on top.

pub mod schedule;
pub mod summary;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::{self, AnnuityTiming};
use crate::types::*;
use crate::FinCalcResult;

pub use schedule::{assign_due_dates, generate_schedule, ScheduleMode, ScheduleRow, MAX_PERIODS};
pub use summary::{summarize_by_calendar_year, summarize_by_year, YearlySummaryRow};

fn default_periods_per_year() -> u32 {
    12
}

/// Input for a fully amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub periods: u32,
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub principal: Money,
    pub schedule: Vec<ScheduleRow>,
}

/// Input for equal periodic contributions (SIP, RD, PPF, NPS).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulationInput {
    pub contribution: Money,
    pub annual_rate_percent: Percent,
    pub periods: u32,
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    #[serde(default)]
    pub timing: AnnuityTiming,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulationOutput {
    pub future_value: Money,
    pub total_contributed: Money,
    pub total_gain: Money,
    pub schedule: Vec<ScheduleRow>,
}

/// Input for a single lumpsum compounding with no further contributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundGrowthInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub periods: u32,
    pub periods_per_year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundGrowthOutput {
    pub future_value: Money,
    pub principal: Money,
    pub total_gain: Money,
    pub schedule: Vec<ScheduleRow>,
}

fn check_common(
    annual_rate_percent: Percent,
    periods: u32,
    periods_per_year: u32,
) -> FinCalcResult<Rate> {
    if periods_per_year == 0 || periods_per_year > 365 {
        return Err(FinCalcError::invalid(
            "periods_per_year",
            "Compounding frequency must be between 1 and 365",
        ));
    }
    if periods > MAX_PERIODS {
        return Err(FinCalcError::InvalidInput {
            field: "periods".into(),
            reason: format!("Number of periods must not exceed {MAX_PERIODS}"),
        });
    }
    let rate = time_value::periodic_rate(annual_rate_percent, periods_per_year);
    if rate > Decimal::ONE {
        return Err(FinCalcError::invalid(
            "annual_rate_percent",
            "Rate exceeds 100% per period",
        ));
    }
    Ok(rate)
}

fn date_rows(
    rows: &mut [ScheduleRow],
    start: Option<NaiveDate>,
    periods_per_year: u32,
    warnings: &mut Vec<String>,
) {
    if let Some(start) = start {
        if !assign_due_dates(rows, start, periods_per_year) {
            warnings.push(format!(
                "{periods_per_year} periods per year is not a whole number of months; due dates omitted"
            ));
        }
    }
}

/// Reducing-balance EMI and full amortization schedule.
pub fn compute_amortization(
    input: &AmortizationInput,
) -> FinCalcResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rate = check_common(input.annual_rate_percent, input.periods, input.periods_per_year)?;
    let payment = time_value::amortizing_payment(input.principal, rate, input.periods)?;

    let mut schedule = generate_schedule(
        &ScheduleMode::AmortizingLoan {
            principal: input.principal,
            payment,
        },
        rate,
        input.periods,
    )?;
    date_rows(&mut schedule, input.start_date, input.periods_per_year, &mut warnings);

    let total_paid = payment * Decimal::from(input.periods);
    let output = AmortizationOutput {
        payment: round2(payment),
        total_paid: round2(total_paid),
        total_interest: round2(total_paid - input.principal),
        principal: input.principal,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-balance amortization (EMI = P·r·(1+r)^n / ((1+r)^n − 1))",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "periods": input.periods,
            "periods_per_year": input.periods_per_year,
            "rounding": "2 dp per emitted figure, balance carried at full precision",
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Future value of equal periodic contributions with a per-period schedule.
pub fn compute_accumulation(
    input: &AccumulationInput,
) -> FinCalcResult<ComputationOutput<AccumulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rate = check_common(input.annual_rate_percent, input.periods, input.periods_per_year)?;
    let future_value =
        time_value::annuity_future_value(input.contribution, rate, input.periods, input.timing)?;

    let mut schedule = generate_schedule(
        &ScheduleMode::Accumulation {
            contribution: input.contribution,
            timing: input.timing,
        },
        rate,
        input.periods,
    )?;
    date_rows(&mut schedule, input.start_date, input.periods_per_year, &mut warnings);

    let total_contributed = input.contribution * Decimal::from(input.periods);
    let output = AccumulationOutput {
        future_value: round2(future_value),
        total_contributed: round2(total_contributed),
        total_gain: round2(future_value - total_contributed),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Future value of annuity (FV = C·((1+r)^n − 1)/r)",
        &serde_json::json!({
            "contribution": input.contribution.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "periods": input.periods,
            "periods_per_year": input.periods_per_year,
            "timing": input.timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Lumpsum compound growth with a per-period schedule.
pub fn compute_compound_growth(
    input: &CompoundGrowthInput,
) -> FinCalcResult<ComputationOutput<CompoundGrowthOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rate = check_common(input.annual_rate_percent, input.periods, input.periods_per_year)?;
    let future_value = time_value::compound_growth(input.principal, rate, input.periods)?;

    let mut schedule = generate_schedule(
        &ScheduleMode::CompoundGrowth {
            principal: input.principal,
        },
        rate,
        input.periods,
    )?;
    date_rows(&mut schedule, input.start_date, input.periods_per_year, &mut warnings);

    let output = CompoundGrowthOutput {
        future_value: round2(future_value),
        principal: input.principal,
        total_gain: round2(future_value - input.principal),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound growth (FV = P·(1+r)^n)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "periods": input.periods,
            "periods_per_year": input.periods_per_year,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn home_loan() -> AmortizationInput {
        AmortizationInput {
            principal: dec!(2_000_000),
            annual_rate_percent: dec!(8.5),
            periods: 240,
            periods_per_year: 12,
            start_date: None,
        }
    }

    #[test]
    fn test_home_loan_totals() {
        let out = compute_amortization(&home_loan()).unwrap().result;
        assert_eq!(out.payment, dec!(17356.46));
        assert_eq!(out.total_paid, dec!(4165551.52));
        assert_eq!(out.total_interest, dec!(2165551.52));
        assert_eq!(out.schedule.len(), 240);
        assert_eq!(out.schedule[239].ending_balance, Decimal::ZERO);
    }

    #[test]
    fn test_rejects_bad_frequency() {
        let mut input = home_loan();
        input.periods_per_year = 0;
        assert!(compute_amortization(&input).is_err());
    }

    #[test]
    fn test_rejects_absurd_rate() {
        let mut input = home_loan();
        input.annual_rate_percent = dec!(1500);
        assert!(compute_amortization(&input).is_err());
    }

    #[test]
    fn test_dated_schedule_warns_on_uneven_frequency() {
        let input = CompoundGrowthInput {
            principal: dec!(1000),
            annual_rate_percent: dec!(10),
            periods: 3,
            periods_per_year: 5,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        let out = compute_compound_growth(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.result.schedule[0].due_date.is_none());
    }

    #[test]
    fn test_accumulation_matches_closed_form() {
        let input = AccumulationInput {
            contribution: dec!(10_000),
            annual_rate_percent: dec!(12),
            periods: 120,
            periods_per_year: 12,
            timing: AnnuityTiming::End,
            start_date: None,
        };
        let out = compute_accumulation(&input).unwrap().result;
        assert_eq!(out.future_value, dec!(2300386.89));
        assert_eq!(out.total_contributed, dec!(1_200_000));
        assert_eq!(out.total_gain, dec!(1100386.89));
        let last = out.schedule.last().unwrap();
        assert!((last.ending_balance - out.future_value).abs() <= dec!(0.01));
    }
}
