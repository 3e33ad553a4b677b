use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, AmortizationInput, ScheduleRow, YearlySummaryRow};
use crate::query::{QueryParams, ShareLink};
use crate::types::*;

/// Loan products that share the reducing-balance EMI engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanProduct {
    HomeLoan,
    PersonalLoan,
    CreditCard,
}

impl LoanProduct {
    pub fn label(&self) -> &'static str {
        match self {
            LoanProduct::HomeLoan => "Home Loan EMI",
            LoanProduct::PersonalLoan => "Personal Loan EMI",
            LoanProduct::CreditCard => "Credit Card EMI",
        }
    }

    /// The figures each calculator opens with before the user edits anything.
    pub fn defaults(&self) -> EmiInput {
        let (principal, rate, months) = match self {
            LoanProduct::HomeLoan => (dec!(2_000_000), dec!(8.5), 240),
            LoanProduct::PersonalLoan => (dec!(500_000), dec!(12), 60),
            LoanProduct::CreditCard => (dec!(100_000), dec!(15), 12),
        };
        EmiInput {
            principal,
            annual_rate_percent: rate,
            months,
            start_date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl EmiInput {
    /// Read `principal`, `rate` and `months` from a share link, falling back
    /// to the product defaults for unusable values.
    pub fn from_query(query: &QueryParams, product: LoanProduct) -> Self {
        let d = product.defaults();
        EmiInput {
            principal: query.number_or("principal", d.principal),
            annual_rate_percent: query.number_or("rate", d.annual_rate_percent),
            months: query.count_or("months", d.months),
            start_date: None,
        }
    }

    pub fn share_link(&self) -> ShareLink {
        ShareLink::Emi {
            principal: self.principal,
            rate: self.annual_rate_percent,
            months: self.months,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub product: LoanProduct,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub months: u32,
    pub emi: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub schedule: Vec<ScheduleRow>,
    pub yearly_summary: Vec<YearlySummaryRow>,
}

/// Monthly EMI, amortization table and year-wise summary for a loan product.
///
/// Invalid entries (non-positive amount or tenure, negative rate) produce a
/// zeroed result with `valid = false` and an explanatory message.
pub fn calculate_emi(product: LoanProduct, input: &EmiInput) -> ComputationOutput<EmiOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let engine_input = AmortizationInput {
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        periods: input.months,
        periods_per_year: 12,
        start_date: input.start_date,
    };

    let output = match amortization::compute_amortization(&engine_input) {
        Ok(computed) => {
            warnings.extend(computed.warnings);
            let loan = computed.result;
            let yearly_summary = amortization::summarize_by_year(&loan.schedule, 12);
            EmiOutput {
                product,
                valid: true,
                message: None,
                principal: input.principal,
                annual_rate_percent: input.annual_rate_percent,
                months: input.months,
                emi: loan.payment,
                total_interest: loan.total_interest,
                total_amount: loan.total_paid,
                schedule: loan.schedule,
                yearly_summary,
            }
        }
        Err(e) => {
            warn!("{}: falling back to zero result: {e}", product.label());
            warnings.push(e.to_string());
            EmiOutput {
                product,
                valid: false,
                message: Some("Enter a positive loan amount and tenure to calculate EMI".into()),
                principal: input.principal,
                annual_rate_percent: input.annual_rate_percent,
                months: input.months,
                emi: Decimal::ZERO,
                total_interest: Decimal::ZERO,
                total_amount: Decimal::ZERO,
                schedule: Vec::new(),
                yearly_summary: Vec::new(),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        product.label(),
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "months": input.months,
            "method": "reducing balance",
        }),
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
    fn test_personal_loan_defaults() {
        let product = LoanProduct::PersonalLoan;
        let out = calculate_emi(product, &product.defaults()).result;
        assert!(out.valid);
        // 500,000 at 12% over 60 months ≈ 11,122.22
        assert_eq!(out.emi, dec!(11122.22));
        assert_eq!(out.schedule.len(), 60);
        assert_eq!(out.yearly_summary.len(), 5);
    }

    #[test]
    fn test_credit_card_zero_rate() {
        let input = EmiInput {
            principal: dec!(12_000),
            annual_rate_percent: Decimal::ZERO,
            months: 12,
            start_date: None,
        };
        let out = calculate_emi(LoanProduct::CreditCard, &input).result;
        assert_eq!(out.emi, dec!(1000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_tenure_gives_zero_result() {
        let input = EmiInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(10),
            months: 0,
            start_date: None,
        };
        let out = calculate_emi(LoanProduct::HomeLoan, &input);
        assert!(!out.result.valid);
        assert_eq!(out.result.emi, Decimal::ZERO);
        assert!(out.result.schedule.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_from_query_falls_back_per_field() {
        let q = QueryParams::parse("principal=750000&rate=&months=abc").unwrap();
        let input = EmiInput::from_query(&q, LoanProduct::HomeLoan);
        assert_eq!(input.principal, dec!(750_000));
        assert_eq!(input.annual_rate_percent, dec!(8.5));
        assert_eq!(input.months, 240);
        assert_eq!(
            input.share_link().to_query_string(),
            "principal=750000&rate=8.5&months=240"
        );
    }
}
