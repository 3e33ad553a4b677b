use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::loans::eligibility::{
    calculate_loan_eligibility, EligibilityInput, EmploymentType,
};
use fincalc_core::loans::emi::{calculate_emi, EmiInput, LoanProduct};
use fincalc_core::loans::quote::{quote_emi, EmiQuoteRequest};
use fincalc_core::query::QueryParams;
use fincalc_core::tables::RateTables;

use super::set;
use crate::input;

/// Arguments shared by the home, personal and credit-card EMI calculators
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Share-link query, e.g. "principal=500000&rate=10.5&months=60"
    #[arg(long)]
    pub query: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Date of the first instalment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Attach a share link on this base URL to the output
    #[arg(long)]
    pub share_url: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProductArg {
    Home,
    Personal,
    CreditCard,
}

impl From<ProductArg> for LoanProduct {
    fn from(arg: ProductArg) -> Self {
        match arg {
            ProductArg::Home => LoanProduct::HomeLoan,
            ProductArg::Personal => LoanProduct::PersonalLoan,
            ProductArg::CreditCard => LoanProduct::CreditCard,
        }
    }
}

/// Arguments for loan eligibility
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// EMIs already being paid each month
    #[arg(long, default_value = "0")]
    pub existing_emi: Decimal,

    /// Applicant is self-employed (lower EMI-to-income ratio)
    #[arg(long)]
    pub self_employed: bool,

    /// Loan tenure in years
    #[arg(long, default_value_t = 5)]
    pub tenure_years: u32,

    /// Annual interest rate (%)
    #[arg(long, default_value = "10")]
    pub rate: Decimal,
}

/// Arguments for the whole-rupee EMI quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to JSON input file with {principal, rate, tenure}
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years; fractions must come to whole months (2.5 = 30 months)
    #[arg(long)]
    pub tenure: Option<Decimal>,
}

/// Resolve EMI input: JSON file or stdin first, then query and flags over
/// the product defaults.
pub(crate) fn resolve_emi_input(
    product: LoanProduct,
    args: &EmiArgs,
) -> Result<EmiInput, Box<dyn std::error::Error>> {
    if let Some(emi) = input::read_input::<EmiInput>(args.input.as_deref())? {
        return Ok(emi);
    }

    let mut emi = match &args.query {
        Some(query) => EmiInput::from_query(&QueryParams::parse(query)?, product),
        None => product.defaults(),
    };
    set(&mut emi.principal, args.principal);
    set(&mut emi.annual_rate_percent, args.rate);
    set(&mut emi.months, args.months);
    if args.start_date.is_some() {
        emi.start_date = args.start_date;
    }
    Ok(emi)
}

pub fn run_emi(product: LoanProduct, args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_emi_input(product, &args)?;
    let result = calculate_emi(product, &emi_input);

    let mut value = serde_json::to_value(result)?;
    if let (Some(base), Value::Object(map)) = (&args.share_url, &mut value) {
        map.insert(
            "share_url".into(),
            Value::String(emi_input.share_link().to_url(base)),
        );
    }
    Ok(value)
}

pub fn run_eligibility(
    args: EligibilityArgs,
    tables: &RateTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let eligibility_input: EligibilityInput =
        match input::read_input(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => EligibilityInput {
                monthly_income: args
                    .monthly_income
                    .ok_or("--monthly-income is required (or provide --input)")?,
                existing_emi: args.existing_emi,
                employment_type: if args.self_employed {
                    EmploymentType::SelfEmployed
                } else {
                    EmploymentType::Salaried
                },
                tenure_years: args.tenure_years,
                annual_rate_percent: args.rate,
            },
        };

    let result = calculate_loan_eligibility(&eligibility_input, tables);
    Ok(serde_json::to_value(result)?)
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: EmiQuoteRequest = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EmiQuoteRequest {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
        },
    };

    let response = quote_emi(&request)?;
    Ok(serde_json::to_value(response)?)
}
