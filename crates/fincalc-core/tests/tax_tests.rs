use fincalc_core::tables::{RateTables, TaxBracket};
use fincalc_core::tax::gratuity::{calculate_gratuity, GratuityInput};
use fincalc_core::tax::gst::{calculate_gst, GstInput, GstMode};
use fincalc_core::tax::hra::{calculate_hra, HraInput};
use fincalc_core::tax::income_tax::{calculate_income_tax, IncomeTaxInput};
use fincalc_core::tax::salary::{calculate_salary, SalaryInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// GST
// ===========================================================================

#[test]
fn test_gst_forward_then_reverse_recovers_base() {
    let tables = RateTables::default();
    for rate in [dec!(5), dec!(12), dec!(18), dec!(28)] {
        let forward = calculate_gst(
            &GstInput {
                amount: dec!(10_000),
                rate_percent: rate,
                mode: GstMode::Forward,
            },
            &tables,
        )
        .result;
        let reverse = calculate_gst(
            &GstInput {
                amount: forward.final_price,
                rate_percent: rate,
                mode: GstMode::Reverse,
            },
            &tables,
        )
        .result;
        assert_eq!(reverse.base_price, dec!(10_000));
        assert_eq!(reverse.gst_amount, forward.gst_amount);
    }
}

#[test]
fn test_gst_nil_rate() {
    let out = calculate_gst(
        &GstInput {
            amount: dec!(2_500),
            rate_percent: Decimal::ZERO,
            mode: GstMode::Forward,
        },
        &RateTables::default(),
    )
    .result;
    assert_eq!(out.gst_amount, Decimal::ZERO);
    assert_eq!(out.category.as_deref(), Some("Nil GST"));
}

// ===========================================================================
// HRA and gratuity
// ===========================================================================

#[test]
fn test_hra_salary_share_is_binding() {
    let input = HraInput {
        basic_salary: dec!(20_000),
        dearness_allowance: Decimal::ZERO,
        hra_received: dec!(15_000),
        rent_paid: dec!(40_000),
        metro: true,
    };
    let out = calculate_hra(&input, &RateTables::default()).result;
    assert_eq!(out.exemption, dec!(10_000));
    assert_eq!(out.taxable_hra, dec!(5_000));
}

#[test]
fn test_gratuity_scenario() {
    let out = calculate_gratuity(&GratuityInput::default(), &RateTables::default());
    assert_eq!(out.result.salary_for_26_days, dec!(2115.38));
    assert_eq!(out.result.gratuity, dec!(21153.85));
    assert!(!out.result.capped);
    assert_eq!(out.metadata.tables_version.as_deref(), Some("FY2024-25"));
}

#[test]
fn test_gratuity_exactly_five_years_is_eligible() {
    let input = GratuityInput {
        years_of_service: 5,
        ..GratuityInput::default()
    };
    let out = calculate_gratuity(&input, &RateTables::default()).result;
    assert!(out.eligible);
    assert_eq!(out.years_pending, 0);
}

// ===========================================================================
// Income tax and salary
// ===========================================================================

#[test]
fn test_income_tax_slab_breakdown() {
    let input = IncomeTaxInput {
        gross_income: dec!(1_500_000),
        section_80c: dec!(150_000),
        section_80d: Decimal::ZERO,
        section_80e: Decimal::ZERO,
        section_80ccd_1b: dec!(50_000),
        age: 40,
    };
    let out = calculate_income_tax(&input, &RateTables::default()).result;

    assert_eq!(out.taxable_income, dec!(1_300_000));
    let taxes: Vec<Decimal> = out.slabs.iter().map(|s| s.tax).collect();
    assert_eq!(taxes, vec![dec!(0), dec!(12_500), dec!(100_000), dec!(90_000)]);
    assert_eq!(out.tax, dec!(202_500));
    // Cess is charged on gross income once taxable income crosses ten lakh
    assert_eq!(out.cess, dec!(60_000));
    assert_eq!(out.total_tax, dec!(262_500));
    assert_eq!(out.effective_rate_percent, dec!(17.5));
}

#[test]
fn test_income_tax_with_next_year_tables() {
    let mut tables = RateTables::default();
    tables.version = "FY2025-26".into();
    tables.income_tax.slabs[0].brackets = vec![
        TaxBracket {
            lower: dec!(0),
            upper: Some(dec!(400_000)),
            rate: dec!(0),
        },
        TaxBracket {
            lower: dec!(400_000),
            upper: None,
            rate: dec!(0.1),
        },
    ];
    tables.validate().unwrap();

    let input = IncomeTaxInput {
        gross_income: dec!(600_000),
        section_80c: Decimal::ZERO,
        section_80d: Decimal::ZERO,
        ..IncomeTaxInput::default()
    };
    let out = calculate_income_tax(&input, &tables);
    assert_eq!(out.result.tax, dec!(20_000));
    assert_eq!(out.metadata.tables_version.as_deref(), Some("FY2025-26"));
}

#[test]
fn test_salary_in_hand_identity() {
    let out = calculate_salary(&SalaryInput::default(), &RateTables::default()).result;
    assert_eq!(
        out.gross_salary - out.total_deductions,
        out.annual_in_hand
    );
    assert_eq!(out.total_deductions, out.epf + out.professional_tax + out.income_tax);
}

// ===========================================================================
// Out-of-range figures
// ===========================================================================

#[test]
fn test_gst_rate_above_hundred_percent_is_invalid() {
    let input = GstInput {
        amount: dec!(1_000_000_000_000_000),
        rate_percent: dec!(100_000_000_000_000_000_000),
        mode: GstMode::Forward,
    };
    let out = calculate_gst(&input, &RateTables::default());
    assert!(!out.result.valid);
    assert_eq!(out.result.gst_amount, Decimal::ZERO);
}

#[test]
fn test_oversized_salary_figures_fall_back_to_zero() {
    let tables = RateTables::default();

    let hra = calculate_hra(
        &HraInput {
            rent_paid: Decimal::MAX,
            ..HraInput::default()
        },
        &tables,
    );
    assert!(!hra.result.valid);
    assert_eq!(hra.warnings.len(), 1);

    let gratuity = calculate_gratuity(
        &GratuityInput {
            last_month_salary: Decimal::MAX,
            ..GratuityInput::default()
        },
        &tables,
    );
    assert!(!gratuity.result.eligible);
    assert_eq!(gratuity.result.gratuity, Decimal::ZERO);

    let tax = calculate_income_tax(
        &IncomeTaxInput {
            gross_income: Decimal::MAX,
            ..IncomeTaxInput::default()
        },
        &tables,
    );
    assert!(!tax.result.valid);
    assert_eq!(tax.result.total_tax, Decimal::ZERO);

    let salary = calculate_salary(
        &SalaryInput {
            hra_percent: dec!(250),
            ..SalaryInput::default()
        },
        &tables,
    );
    assert!(!salary.result.valid);
}
