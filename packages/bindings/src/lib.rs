use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;

use fincalc_core::tables::RateTables;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

/// Caller-supplied rate tables, or the built-in set when none are passed.
fn tables(tables_json: Option<String>) -> NapiResult<RateTables> {
    match tables_json {
        Some(json) => {
            let tables: RateTables = parse(&json)?;
            tables.validate().map_err(to_napi_error)?;
            Ok(tables)
        }
        None => Ok(RateTables::default()),
    }
}

/// `"home_loan"`, `"personal_loan"` or `"credit_card"`.
fn loan_product(name: String) -> NapiResult<fincalc_core::loans::emi::LoanProduct> {
    serde_json::from_value(serde_json::Value::String(name)).map_err(to_napi_error)
}

fn emit<T: serde::Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(product: String, input_json: String) -> NapiResult<String> {
    use fincalc_core::loans::emi::{self, EmiInput};

    let product = loan_product(product)?;
    let input: EmiInput = parse(&input_json)?;
    emit(&emi::calculate_emi(product, &input))
}

#[napi]
pub fn emi_share_link(input_json: String, base_url: String) -> NapiResult<String> {
    let input: fincalc_core::loans::emi::EmiInput = parse(&input_json)?;
    Ok(input.share_link().to_url(&base_url))
}

#[napi]
pub fn emi_from_query(product: String, query: String) -> NapiResult<String> {
    use fincalc_core::loans::emi::EmiInput;

    let product = loan_product(product)?;
    let params = fincalc_core::query::QueryParams::parse(&query).map_err(to_napi_error)?;
    emit(&EmiInput::from_query(&params, product))
}

#[napi]
pub fn loan_report(product: String, input_json: String) -> NapiResult<String> {
    use fincalc_core::loans::emi::{self, EmiInput};

    let product = loan_product(product)?;
    let input: EmiInput = parse(&input_json)?;
    let output = emi::calculate_emi(product, &input);
    emit(&fincalc_core::report::LoanReport::from_output(&output.result))
}

#[napi]
pub fn loan_eligibility(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::loans::eligibility::EligibilityInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::loans::eligibility::calculate_loan_eligibility(
        &input, &tables,
    ))
}

/// `{principal, rate, tenure}` in, `{emi}` out.
#[napi]
pub fn emi_quote(request_json: String) -> NapiResult<String> {
    let request: fincalc_core::loans::quote::EmiQuoteRequest = parse(&request_json)?;
    let response = fincalc_core::loans::quote::quote_emi(&request).map_err(to_napi_error)?;
    emit(&response)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::sip::SipInput = parse(&input_json)?;
    emit(&fincalc_core::savings::sip::calculate_sip(&input))
}

#[napi]
pub fn calculate_rd(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::sip::RdInput = parse(&input_json)?;
    emit(&fincalc_core::savings::sip::calculate_rd(&input))
}

#[napi]
pub fn calculate_ppf(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::sip::PpfInput = parse(&input_json)?;
    emit(&fincalc_core::savings::sip::calculate_ppf(&input))
}

#[napi]
pub fn calculate_nps(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::savings::nps::NpsInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::savings::nps::calculate_nps(&input, &tables))
}

#[napi]
pub fn calculate_lumpsum(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::deposits::LumpsumInput = parse(&input_json)?;
    emit(&fincalc_core::savings::deposits::calculate_lumpsum(&input))
}

#[napi]
pub fn calculate_fd(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::deposits::FdInput = parse(&input_json)?;
    emit(&fincalc_core::savings::deposits::calculate_fd(&input))
}

#[napi]
pub fn compound_interest(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::interest::CompoundInterestInput = parse(&input_json)?;
    emit(&fincalc_core::savings::interest::calculate_compound_interest(&input))
}

#[napi]
pub fn simple_interest(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::savings::interest::SimpleInterestInput = parse(&input_json)?;
    emit(&fincalc_core::savings::interest::calculate_simple_interest(&input))
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_gst(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::tax::gst::GstInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::tax::gst::calculate_gst(&input, &tables))
}

#[napi]
pub fn calculate_hra(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::tax::hra::HraInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::tax::hra::calculate_hra(&input, &tables))
}

#[napi]
pub fn calculate_gratuity(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::tax::gratuity::GratuityInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::tax::gratuity::calculate_gratuity(&input, &tables))
}

#[napi]
pub fn calculate_income_tax(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::tax::income_tax::IncomeTaxInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::tax::income_tax::calculate_income_tax(&input, &tables))
}

#[napi]
pub fn calculate_salary(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::tax::salary::SalaryInput = parse(&input_json)?;
    let tables = tables(tables_json)?;
    emit(&fincalc_core::tax::salary::calculate_salary(&input, &tables))
}

// ---------------------------------------------------------------------------
// Tables and formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn default_rate_tables() -> NapiResult<String> {
    emit(&RateTables::default())
}

/// `"2000000"` -> `"₹20,00,000"`
#[napi]
pub fn format_inr(value: String) -> NapiResult<String> {
    let value: rust_decimal::Decimal = value.trim().parse().map_err(to_napi_error)?;
    Ok(fincalc_core::format::format_inr(value))
}
