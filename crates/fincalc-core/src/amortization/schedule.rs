use chrono::{Months, NaiveDate};
use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
pub use crate::time_value::MAX_PERIODS;
use crate::time_value::{AnnuityTiming, MAX_AMOUNT};
use crate::types::{round2, Money, Rate};
use crate::FinCalcResult;

/// One period of a loan or investment schedule. Figures are rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// EMI for loans, the contribution for accumulations, zero for lumpsum growth.
    pub payment: Money,
    /// Principal repaid (loans) or amount contributed (accumulations).
    pub principal_component: Money,
    /// Interest charged (loans) or growth earned (investments).
    pub interest_component: Money,
    pub ending_balance: Money,
}

/// How the balance evolves from one period to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Reducing balance: interest on the outstanding principal, fixed payment.
    AmortizingLoan { principal: Money, payment: Money },
    /// Equal contributions compounding from a zero balance.
    Accumulation {
        contribution: Money,
        #[serde(default)]
        timing: AnnuityTiming,
    },
    /// A single upfront principal compounding with no further contributions.
    CompoundGrowth { principal: Money },
}

impl ScheduleMode {
    fn label(&self) -> &'static str {
        match self {
            ScheduleMode::AmortizingLoan { .. } => "amortizing_loan",
            ScheduleMode::Accumulation { .. } => "accumulation",
            ScheduleMode::CompoundGrowth { .. } => "compound_growth",
        }
    }

    fn validate(&self) -> FinCalcResult<()> {
        let (field, amount) = match self {
            ScheduleMode::AmortizingLoan { principal, payment } => {
                if *payment < Decimal::ZERO || *payment > MAX_AMOUNT {
                    return Err(FinCalcError::InvalidInput {
                        field: "payment".into(),
                        reason: format!("Payment must be between 0 and {MAX_AMOUNT}"),
                    });
                }
                ("principal", *principal)
            }
            ScheduleMode::Accumulation { contribution, .. } => ("contribution", *contribution),
            ScheduleMode::CompoundGrowth { principal } => ("principal", *principal),
        };
        if amount <= Decimal::ZERO {
            return Err(FinCalcError::InvalidInput {
                field: field.into(),
                reason: format!("{field} must be positive"),
            });
        }
        if amount > MAX_AMOUNT {
            return Err(FinCalcError::InvalidInput {
                field: field.into(),
                reason: format!("{field} exceeds {MAX_AMOUNT}"),
            });
        }
        Ok(())
    }

    fn overflow(&self) -> FinCalcError {
        FinCalcError::InvalidInput {
            field: "periods".into(),
            reason: format!("{} balance exceeds the supported range", self.label()),
        }
    }
}

/// Step a schedule forward for exactly `periods` periods at per-period `rate`.
///
/// The running balance is carried at full precision; each emitted row is
/// rounded to 2 dp. The last row of a loan is clamped to a zero balance so
/// the table never ends on a stray fraction of a paisa.
pub fn generate_schedule(
    mode: &ScheduleMode,
    rate: Rate,
    periods: u32,
) -> FinCalcResult<Vec<ScheduleRow>> {
    mode.validate()?;
    if rate < Decimal::ZERO {
        return Err(FinCalcError::invalid("rate", "Rate must not be negative"));
    }
    if rate > Decimal::ONE {
        return Err(FinCalcError::invalid("rate", "Rate exceeds 100% per period"));
    }
    if periods == 0 || periods > MAX_PERIODS {
        return Err(FinCalcError::InvalidInput {
            field: "periods".into(),
            reason: format!("Number of periods must be between 1 and {MAX_PERIODS}"),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut rows = Vec::with_capacity(periods as usize);

    match mode {
        ScheduleMode::AmortizingLoan { principal, payment } => {
            let mut balance = *principal;
            for period in 1..=periods {
                let interest = balance.checked_mul(rate).ok_or_else(|| mode.overflow())?;
                let principal_part = *payment - interest;
                balance = balance
                    .checked_sub(principal_part)
                    .ok_or_else(|| mode.overflow())?;
                let ending = if period == periods {
                    Decimal::ZERO
                } else {
                    balance.max(Decimal::ZERO)
                };
                rows.push(emit(period, *payment, principal_part, interest, ending));
            }
        }
        ScheduleMode::Accumulation {
            contribution,
            timing,
        } => {
            let mut balance = Decimal::ZERO;
            for period in 1..=periods {
                let previous = balance;
                balance = match timing {
                    AnnuityTiming::End => balance
                        .checked_mul(one_plus_r)
                        .and_then(|b| b.checked_add(*contribution)),
                    AnnuityTiming::Beginning => balance
                        .checked_add(*contribution)
                        .and_then(|b| b.checked_mul(one_plus_r)),
                }
                .ok_or_else(|| mode.overflow())?;
                let growth = balance - previous - *contribution;
                rows.push(emit(period, *contribution, *contribution, growth, balance));
            }
        }
        ScheduleMode::CompoundGrowth { principal } => {
            let mut balance = *principal;
            for period in 1..=periods {
                let previous = balance;
                balance = balance
                    .checked_mul(one_plus_r)
                    .ok_or_else(|| mode.overflow())?;
                rows.push(emit(
                    period,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    balance - previous,
                    balance,
                ));
            }
        }
    }

    trace!(
        "generated {} schedule with {} rows at periodic rate {}",
        mode.label(),
        rows.len(),
        rate
    );
    Ok(rows)
}

fn emit(
    period: u32,
    payment: Money,
    principal_component: Money,
    interest_component: Money,
    ending_balance: Money,
) -> ScheduleRow {
    ScheduleRow {
        period,
        due_date: None,
        payment: round2(payment),
        principal_component: round2(principal_component),
        interest_component: round2(interest_component),
        ending_balance: round2(ending_balance),
    }
}

/// Stamp each row with its due date, `12 / periods_per_year` months apart.
///
/// Returns false (leaving rows undated) when the frequency does not divide a
/// year into whole months.
pub fn assign_due_dates(
    rows: &mut [ScheduleRow],
    start: NaiveDate,
    periods_per_year: u32,
) -> bool {
    if periods_per_year == 0 || 12 % periods_per_year != 0 {
        return false;
    }
    let step = 12 / periods_per_year;
    for row in rows.iter_mut() {
        let offset = Months::new((row.period - 1) * step);
        row.due_date = start.checked_add_months(offset);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_schedule_reduces_to_zero() {
        let mode = ScheduleMode::AmortizingLoan {
            principal: dec!(1000),
            payment: crate::time_value::amortizing_payment(dec!(1000), dec!(0.01), 3).unwrap(),
        };
        let rows = generate_schedule(&mode, dec!(0.01), 3).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].interest_component, dec!(10.00));
        assert_eq!(rows[0].payment, dec!(340.02));
        assert_eq!(rows[0].principal_component, dec!(330.02));
        assert_eq!(rows[0].ending_balance, dec!(669.98));
        assert_eq!(rows[2].ending_balance, Decimal::ZERO);
    }

    #[test]
    fn test_accumulation_growth_component() {
        let mode = ScheduleMode::Accumulation {
            contribution: dec!(100),
            timing: AnnuityTiming::End,
        };
        let rows = generate_schedule(&mode, dec!(0.10), 2).unwrap();
        assert_eq!(rows[0].ending_balance, dec!(100));
        assert_eq!(rows[0].interest_component, Decimal::ZERO);
        assert_eq!(rows[1].ending_balance, dec!(210));
        assert_eq!(rows[1].interest_component, dec!(10));
    }

    #[test]
    fn test_annuity_due_earns_in_first_period() {
        let mode = ScheduleMode::Accumulation {
            contribution: dec!(100),
            timing: AnnuityTiming::Beginning,
        };
        let rows = generate_schedule(&mode, dec!(0.10), 1).unwrap();
        assert_eq!(rows[0].ending_balance, dec!(110));
        assert_eq!(rows[0].interest_component, dec!(10));
    }

    #[test]
    fn test_compound_growth_schedule() {
        let mode = ScheduleMode::CompoundGrowth {
            principal: dec!(1000),
        };
        let rows = generate_schedule(&mode, dec!(0.05), 2).unwrap();
        assert_eq!(rows[0].ending_balance, dec!(1050));
        assert_eq!(rows[1].ending_balance, dec!(1102.50));
        assert_eq!(rows[1].interest_component, dec!(52.50));
        assert!(rows.iter().all(|r| r.payment.is_zero()));
    }

    #[test]
    fn test_rejects_out_of_range_periods() {
        let mode = ScheduleMode::CompoundGrowth {
            principal: dec!(1000),
        };
        assert!(generate_schedule(&mode, dec!(0.05), 0).is_err());
        assert!(generate_schedule(&mode, dec!(0.05), MAX_PERIODS + 1).is_err());
    }

    #[test]
    fn test_due_dates_quarterly() {
        let mode = ScheduleMode::CompoundGrowth {
            principal: dec!(1000),
        };
        let mut rows = generate_schedule(&mode, dec!(0.01), 3).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert!(assign_due_dates(&mut rows, start, 4));
        assert_eq!(rows[1].due_date, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(rows[2].due_date, NaiveDate::from_ymd_opt(2025, 5, 30));
    }

    #[test]
    fn test_due_dates_need_whole_month_steps() {
        let mode = ScheduleMode::CompoundGrowth {
            principal: dec!(1000),
        };
        let mut rows = generate_schedule(&mode, dec!(0.01), 2).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!assign_due_dates(&mut rows, start, 5));
        assert!(rows.iter().all(|r| r.due_date.is_none()));
    }
}
