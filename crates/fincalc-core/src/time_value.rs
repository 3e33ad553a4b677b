use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::types::{Money, Percent, Rate};
use crate::FinCalcResult;

/// Largest principal or contribution accepted (₹100 lakh crore).
pub const MAX_AMOUNT: Money = dec!(100_000_000_000_000);

/// Upper bound on tenure: 100 years of monthly periods.
pub const MAX_PERIODS: u32 = 1200;

/// The same bound expressed in years.
pub const MAX_YEARS: u32 = MAX_PERIODS / 12;

/// Largest percentage a product calculator accepts for rates and salary shares.
pub const MAX_PERCENT: Percent = dec!(100);

/// Cap on (1+r)^n so downstream products stay inside the decimal range.
const MAX_GROWTH_FACTOR: Decimal = dec!(1_000_000_000_000);

/// Whether each contribution lands at the end or the start of its period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnuityTiming {
    /// Ordinary annuity (SIP, NPS, PPF).
    #[default]
    End,
    /// Annuity-due: the deposit earns interest in the period it is made (RD).
    Beginning,
}

/// Per-period decimal rate from an annual percentage and compounding frequency.
///
/// `periodic_rate(8.5, 12)` is `0.085 / 12`. A zero frequency yields zero
/// rather than dividing by it; callers validate the frequency separately.
pub fn periodic_rate(annual_rate_percent: Percent, periods_per_year: u32) -> Rate {
    if periods_per_year == 0 {
        return Decimal::ZERO;
    }
    annual_rate_percent / dec!(100) / Decimal::from(periods_per_year)
}

/// Compute (1 + r)^n by iterative multiplication, failing instead of overflowing.
pub fn growth_factor(rate: Rate, periods: u32) -> FinCalcResult<Decimal> {
    if periods > MAX_PERIODS {
        return Err(too_many_periods());
    }
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result = result
            .checked_mul(factor)
            .filter(|f| *f <= MAX_GROWTH_FACTOR)
            .ok_or_else(|| {
                FinCalcError::invalid("periods", "growth factor exceeds supported range")
            })?;
    }
    Ok(result)
}

fn validate(field: &str, amount: Money, rate: Rate, periods: u32) -> FinCalcResult<()> {
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
    if rate < Decimal::ZERO {
        return Err(FinCalcError::invalid("rate", "Rate must not be negative"));
    }
    if rate > Decimal::ONE {
        return Err(FinCalcError::invalid("rate", "Rate exceeds 100% per period"));
    }
    if periods == 0 {
        return Err(FinCalcError::invalid(
            "periods",
            "Number of periods must be >= 1",
        ));
    }
    if periods > MAX_PERIODS {
        return Err(too_many_periods());
    }
    Ok(())
}

fn too_many_periods() -> FinCalcError {
    FinCalcError::InvalidInput {
        field: "periods".into(),
        reason: format!("Number of periods must not exceed {MAX_PERIODS}"),
    }
}

/// True when every figure is a non-negative amount no larger than `MAX_AMOUNT`.
pub(crate) fn amounts_in_range(amounts: &[Money]) -> bool {
    amounts
        .iter()
        .all(|a| *a >= Decimal::ZERO && *a <= MAX_AMOUNT)
}

/// True when every percentage lies in `0..=MAX_PERCENT`.
pub(crate) fn percents_in_range(percents: &[Percent]) -> bool {
    percents
        .iter()
        .all(|p| *p >= Decimal::ZERO && *p <= MAX_PERCENT)
}

/// Fixed periodic payment (EMI) on a fully amortizing loan.
///
/// `P·r·(1+r)^n / ((1+r)^n − 1)`, or exactly `P / n` when `r = 0`.
pub fn amortizing_payment(principal: Money, rate: Rate, periods: u32) -> FinCalcResult<Money> {
    validate("principal", principal, rate, periods)?;

    let n = Decimal::from(periods);
    if rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = growth_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }
    Ok(principal * rate * factor / denominator)
}

/// Future value of `periods` equal contributions.
///
/// `C·((1+r)^n − 1)/r`, times `(1+r)` for an annuity-due; `C·n` when `r = 0`.
pub fn annuity_future_value(
    contribution: Money,
    rate: Rate,
    periods: u32,
    timing: AnnuityTiming,
) -> FinCalcResult<Money> {
    validate("contribution", contribution, rate, periods)?;

    if rate.is_zero() {
        return Ok(contribution * Decimal::from(periods));
    }

    let factor = growth_factor(rate, periods)?;
    let fv = contribution * (factor - Decimal::ONE) / rate;
    Ok(match timing {
        AnnuityTiming::End => fv,
        AnnuityTiming::Beginning => fv * (Decimal::ONE + rate),
    })
}

/// Periodic contribution needed to reach `target` after `periods`.
pub fn required_contribution(
    target: Money,
    rate: Rate,
    periods: u32,
    timing: AnnuityTiming,
) -> FinCalcResult<Money> {
    validate("target", target, rate, periods)?;

    let n = Decimal::from(periods);
    if rate.is_zero() {
        return Ok(target / n);
    }

    let factor = growth_factor(rate, periods)?;
    let mut accumulation = (factor - Decimal::ONE) / rate;
    if timing == AnnuityTiming::Beginning {
        accumulation *= Decimal::ONE + rate;
    }
    if accumulation.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "annuity accumulation factor".into(),
        });
    }
    Ok(target / accumulation)
}

/// Lumpsum growth `P·(1+r)^n`.
pub fn compound_growth(principal: Money, rate: Rate, periods: u32) -> FinCalcResult<Money> {
    validate("principal", principal, rate, periods)?;
    Ok(principal * growth_factor(rate, periods)?)
}

/// Loan amount a fixed payment services: `PMT·((1+r)^n − 1)/(r·(1+r)^n)`.
///
/// This inverts [`amortizing_payment`]; `r = 0` gives `PMT·n`.
pub fn annuity_present_value(payment: Money, rate: Rate, periods: u32) -> FinCalcResult<Money> {
    validate("payment", payment, rate, periods)?;

    if rate.is_zero() {
        return Ok(payment * Decimal::from(periods));
    }

    let factor = growth_factor(rate, periods)?;
    let denominator = rate * factor;
    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "present value annuity factor".into(),
        });
    }
    Ok(payment * (factor - Decimal::ONE) / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_periodic_rate_monthly() {
        assert_eq!(periodic_rate(dec!(12), 12), dec!(0.01));
        assert_eq!(periodic_rate(dec!(6.5), 4), dec!(0.01625));
        assert_eq!(periodic_rate(dec!(7.1), 1), dec!(0.071));
    }

    #[test]
    fn test_periodic_rate_zero_frequency() {
        assert_eq!(periodic_rate(dec!(12), 0), Decimal::ZERO);
    }

    #[test]
    fn test_emi_home_loan() {
        let r = periodic_rate(dec!(8.5), 12);
        let emi = amortizing_payment(dec!(2_000_000), r, 240).unwrap();
        // 2,000,000 at 8.5% over 20 years ≈ 17,356.46
        assert!((emi - dec!(17356.4647)).abs() < dec!(0.001));
    }

    #[test]
    fn test_emi_zero_rate_is_exact_division() {
        let emi = amortizing_payment(dec!(100_000), Decimal::ZERO, 12).unwrap();
        assert_eq!(emi, dec!(100_000) / dec!(12));
    }

    #[test]
    fn test_sip_future_value() {
        let r = periodic_rate(dec!(12), 12);
        let fv = annuity_future_value(dec!(10_000), r, 120, AnnuityTiming::End).unwrap();
        assert!((fv - dec!(2_300_386.89)).abs() < dec!(0.01));

        let due = annuity_future_value(dec!(10_000), r, 120, AnnuityTiming::Beginning).unwrap();
        assert!((due - dec!(2_323_390.76)).abs() < dec!(0.01));
    }

    #[test]
    fn test_future_value_zero_rate() {
        let fv = annuity_future_value(dec!(500), Decimal::ZERO, 24, AnnuityTiming::End).unwrap();
        assert_eq!(fv, dec!(12_000));
    }

    #[test]
    fn test_required_contribution_inverts_future_value() {
        let r = periodic_rate(dec!(12), 12);
        let fv = annuity_future_value(dec!(10_000), r, 120, AnnuityTiming::End).unwrap();
        let c = required_contribution(fv, r, 120, AnnuityTiming::End).unwrap();
        assert!((c - dec!(10_000)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_compound_growth() {
        let fv = compound_growth(dec!(100_000), dec!(0.08), 5).unwrap();
        assert_eq!(fv.round_dp(2), dec!(146_932.81));
    }

    #[test]
    fn test_present_value_inverts_emi() {
        let r = periodic_rate(dec!(10), 12);
        let emi = amortizing_payment(dec!(750_000), r, 60).unwrap();
        let pv = annuity_present_value(emi, r, 60).unwrap();
        assert!((pv - dec!(750_000)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(amortizing_payment(Decimal::ZERO, dec!(0.01), 12).is_err());
        assert!(amortizing_payment(dec!(1000), dec!(-0.01), 12).is_err());
        assert!(amortizing_payment(dec!(1000), dec!(0.01), 0).is_err());
        assert!(annuity_future_value(dec!(-5), dec!(0.01), 12, AnnuityTiming::End).is_err());
        assert!(compound_growth(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_growth_factor_overflow_is_error() {
        assert!(growth_factor(dec!(10), 100).is_err());
    }

    #[test]
    fn test_tiny_rate_long_tenure_rejected_up_front() {
        let r = periodic_rate(dec!(0.0000001), 12);
        assert!(amortizing_payment(dec!(100_000), r, MAX_PERIODS).is_ok());
        match amortizing_payment(dec!(100_000), r, 24_000_000) {
            Err(FinCalcError::InvalidInput { field, .. }) => assert_eq!(field, "periods"),
            other => panic!("expected periods error, got {other:?}"),
        }
        assert!(growth_factor(r, u32::MAX).is_err());
        assert!(annuity_present_value(dec!(5_000), r, MAX_PERIODS + 1).is_err());
    }

    #[test]
    fn test_range_helpers() {
        assert!(amounts_in_range(&[Decimal::ZERO, MAX_AMOUNT]));
        assert!(!amounts_in_range(&[dec!(1), MAX_AMOUNT + Decimal::ONE]));
        assert!(!amounts_in_range(&[dec!(-0.01)]));
        assert!(percents_in_range(&[dec!(0), dec!(18), dec!(100)]));
        assert!(!percents_in_range(&[dec!(100.01)]));
    }
}
