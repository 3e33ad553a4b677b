use fincalc_core::loans::eligibility::{calculate_loan_eligibility, EligibilityInput, EmploymentType};
use fincalc_core::loans::emi::{calculate_emi, EmiInput, LoanProduct};
use fincalc_core::loans::quote::{quote_emi, EmiQuoteRequest, EmiQuoteResponse};
use fincalc_core::query::QueryParams;
use fincalc_core::report::LoanReport;
use fincalc_core::tables::RateTables;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI calculators
// ===========================================================================

#[test]
fn test_each_product_opens_with_a_valid_result() {
    for product in [
        LoanProduct::HomeLoan,
        LoanProduct::PersonalLoan,
        LoanProduct::CreditCard,
    ] {
        let out = calculate_emi(product, &product.defaults());
        assert!(out.result.valid, "{} should be valid", product.label());
        assert!(out.warnings.is_empty());
        assert_eq!(out.methodology, product.label());
    }
}

#[test]
fn test_home_loan_yearly_summary_matches_schedule() {
    let product = LoanProduct::HomeLoan;
    let out = calculate_emi(product, &product.defaults()).result;

    assert_eq!(out.emi, dec!(17356.46));
    assert_eq!(out.total_amount, dec!(4165551.52));
    assert_eq!(out.yearly_summary.len(), 20);

    let interest: Decimal = out.yearly_summary.iter().map(|y| y.interest_component).sum();
    assert!((interest - out.total_interest).abs() <= dec!(2.40));
    assert_eq!(out.yearly_summary[19].ending_balance, Decimal::ZERO);
}

#[test]
fn test_share_link_round_trip() {
    let input = EmiInput {
        principal: dec!(3_500_000),
        annual_rate_percent: dec!(9.25),
        months: 180,
        start_date: None,
    };
    let link = input.share_link().to_query_string();
    let back = EmiInput::from_query(&QueryParams::parse(&link).unwrap(), LoanProduct::HomeLoan);

    assert_eq!(back.principal, input.principal);
    assert_eq!(back.annual_rate_percent, input.annual_rate_percent);
    assert_eq!(back.months, input.months);
}

#[test]
fn test_report_sheets_follow_schedule() {
    let product = LoanProduct::PersonalLoan;
    let out = calculate_emi(product, &product.defaults()).result;
    let report = LoanReport::from_output(&out);

    assert_eq!(
        report.monthly.headers,
        vec!["Month", "EMI", "Principal", "Interest", "Balance"]
    );
    assert_eq!(report.monthly.rows.len(), 60);
    assert_eq!(report.summary.rows[0], vec!["Loan Amount", "500000"]);
    assert_eq!(report.summary.rows[3], vec!["Loan Tenure (Years)", "5 years 0 months"]);
    assert_eq!(report.sheets().len(), 3);
}

// ===========================================================================
// Eligibility
// ===========================================================================

#[test]
fn test_eligibility_tagged_with_tables_version() {
    let input = EligibilityInput {
        monthly_income: dec!(100_000),
        existing_emi: Decimal::ZERO,
        employment_type: EmploymentType::Salaried,
        tenure_years: 20,
        annual_rate_percent: dec!(8.5),
    };
    let out = calculate_loan_eligibility(&input, &RateTables::default());

    assert_eq!(out.metadata.tables_version.as_deref(), Some("FY2024-25"));
    assert!(out.result.eligible);
    assert_eq!(out.result.available_emi, dec!(45_000));
    // 45,000 / 17,356.46 × 2,000,000 ≈ 51.85 lakh
    assert!(out.result.max_eligible_loan > dec!(5_180_000));
    assert!(out.result.max_eligible_loan < dec!(5_190_000));
}

#[test]
fn test_custom_ratio_table() {
    let mut tables = RateTables::default();
    tables.eligibility.salaried_emi_ratio = dec!(0.5);
    let input = EligibilityInput {
        monthly_income: dec!(40_000),
        existing_emi: dec!(20_000),
        employment_type: EmploymentType::Salaried,
        tenure_years: 5,
        annual_rate_percent: dec!(10),
    };
    let out = calculate_loan_eligibility(&input, &tables).result;
    assert!(!out.eligible);
    assert_eq!(out.available_emi, Decimal::ZERO);
}

// ===========================================================================
// Quick quote
// ===========================================================================

#[test]
fn test_quote_wire_format() {
    let request: EmiQuoteRequest =
        serde_json::from_str(r#"{"principal": "2000000", "rate": "8.5", "tenure": 20}"#).unwrap();
    let response = quote_emi(&request).unwrap();
    assert_eq!(response, EmiQuoteResponse { emi: 17356 });
}

#[test]
fn test_quote_accepts_numeric_json() {
    let request: EmiQuoteRequest =
        serde_json::from_str(r#"{"principal": 500000, "rate": 12, "tenure": 5}"#).unwrap();
    assert_eq!(quote_emi(&request).unwrap().emi, 11122);
}

#[test]
fn test_quote_half_year_tenure() {
    let request: EmiQuoteRequest =
        serde_json::from_str(r#"{"principal": 500000, "rate": 12, "tenure": 2.5}"#).unwrap();
    let thirty_months = quote_emi(&EmiQuoteRequest {
        principal: dec!(500000),
        rate: dec!(12),
        tenure: dec!(2.5),
    })
    .unwrap();
    assert_eq!(quote_emi(&request).unwrap(), thirty_months);
    // 500000 · 0.01 · 1.01^30 / (1.01^30 − 1)
    assert_eq!(thirty_months.emi, 19374);
}

#[test]
fn test_quote_huge_tenure_fails_fast() {
    let request: EmiQuoteRequest =
        serde_json::from_str(r#"{"principal": 500000, "rate": 0.0001, "tenure": 2000000}"#)
            .unwrap();
    assert!(quote_emi(&request).is_err());
}
