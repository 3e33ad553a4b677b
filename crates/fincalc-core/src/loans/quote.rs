use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::time_value;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Body of the quick EMI endpoint: `rate` is % p.a., `tenure` is in years.
///
/// Fractional tenures are accepted as long as they come to whole months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiQuoteRequest {
    pub principal: Money,
    pub rate: Percent,
    pub tenure: Decimal,
}

/// The EMI rounded to a whole rupee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiQuoteResponse {
    pub emi: i64,
}

/// `round(P·r·(1+r)^n / ((1+r)^n − 1))` with `r = rate / 1200`, `n = tenure · 12`.
pub fn quote_emi(request: &EmiQuoteRequest) -> FinCalcResult<EmiQuoteResponse> {
    let rate = time_value::periodic_rate(request.rate, 12);
    let months = tenure_months(request.tenure)?;
    let emi = time_value::amortizing_payment(request.principal, rate, months)?;

    emi.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(|emi| EmiQuoteResponse { emi })
        .ok_or_else(|| FinCalcError::invalid("principal", "EMI does not fit a whole-rupee amount"))
}

fn tenure_months(tenure: Decimal) -> FinCalcResult<u32> {
    let months = tenure
        .checked_mul(Decimal::from(12))
        .ok_or_else(|| FinCalcError::invalid("tenure", "Tenure is too long"))?;
    if !months.fract().is_zero() {
        return Err(FinCalcError::invalid(
            "tenure",
            "Tenure must come to a whole number of months",
        ));
    }
    months
        .to_u32()
        .ok_or_else(|| FinCalcError::invalid("tenure", "Tenure must not be negative or too long"))
}

/// Shorthand when the caller already holds the three numbers.
pub fn quote_emi_for(principal: Money, rate: Percent, tenure: Decimal) -> FinCalcResult<i64> {
    quote_emi(&EmiQuoteRequest {
        principal,
        rate,
        tenure,
    })
    .map(|r| r.emi)
}
