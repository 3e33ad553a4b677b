use fincalc_core::query::QueryParams;
use fincalc_core::savings::deposits::{
    calculate_fd, calculate_lumpsum, Compounding, FdInput, LumpsumInput,
};
use fincalc_core::savings::interest::{
    calculate_compound_interest, calculate_simple_interest, CompoundInterestInput,
};
use fincalc_core::savings::nps::{calculate_nps, NpsInput};
use fincalc_core::savings::sip::{
    calculate_ppf, calculate_rd, calculate_sip, PpfInput, RdInput, SipInput,
};
use fincalc_core::tables::RateTables;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Monthly plans
// ===========================================================================

#[test]
fn test_sip_yearly_rows_accumulate() {
    let out = calculate_sip(&SipInput::default()).result;

    let last = out.yearly.last().unwrap();
    assert!((last.balance - out.maturity_amount).abs() <= dec!(0.01));
    assert_eq!(last.total_invested, out.total_invested);
    assert!((last.total_gain - out.total_gain).abs() <= dec!(0.01));
    for pair in out.yearly.windows(2) {
        assert!(pair[1].balance > pair[0].balance);
    }
}

#[test]
fn test_rd_earns_more_than_equivalent_sip() {
    let rd = calculate_rd(&RdInput {
        monthly_deposit: dec!(10_000),
        annual_rate_percent: dec!(12),
        months: 120,
    })
    .result;
    // Deposits credited at the start of the month: annuity-due
    assert_eq!(rd.maturity_amount, dec!(2323390.76));

    let sip = calculate_sip(&SipInput::default()).result;
    assert!(rd.maturity_amount > sip.maturity_amount);
}

#[test]
fn test_ppf_fifteen_years() {
    let out = calculate_ppf(&PpfInput::default()).result;
    assert!(out.valid);
    assert_eq!(out.total_invested, dec!(2_250_000));
    assert_eq!(out.yearly.len(), 15);
    assert!(out.maturity_amount > dec!(3_790_000));
    assert!(out.maturity_amount < dec!(3_800_000));
}

#[test]
fn test_nps_custom_split() {
    let mut tables = RateTables::default();
    tables.nps.lumpsum_share = dec!(0.4);
    tables.nps.annuity_share = dec!(0.6);

    let out = calculate_nps(&NpsInput::default(), &tables);
    assert_eq!(out.metadata.tables_version.as_deref(), Some("FY2024-25"));
    let r = out.result;
    assert_eq!(r.lumpsum_withdrawal + r.annuity_amount, r.corpus);
    assert!(r.annuity_amount > r.lumpsum_withdrawal);
}

// ===========================================================================
// Deposits
// ===========================================================================

#[test]
fn test_fd_compounding_frequency_ordering() {
    let run = |compounding| {
        calculate_fd(&FdInput {
            principal: dec!(100_000),
            annual_rate_percent: dec!(7),
            months: 36,
            compounding,
        })
        .result
        .maturity_amount
    };
    let annual = run(Compounding::Annual);
    let quarterly = run(Compounding::Quarterly);
    let monthly = run(Compounding::Monthly);

    // 100,000 × 1.07^3
    assert_eq!(annual, dec!(122504.30));
    assert!(annual < quarterly);
    assert!(quarterly < monthly);
}

#[test]
fn test_lumpsum_rows_report_cumulative_returns() {
    let out = calculate_lumpsum(&LumpsumInput {
        investment_amount: dec!(100_000),
        annual_return_percent: dec!(10),
        years: 3,
    })
    .result;

    let returns: Vec<Decimal> = out.yearly.iter().map(|y| y.return_percent).collect();
    assert_eq!(returns, vec![dec!(10), dec!(21), dec!(33.1)]);
    assert_eq!(out.future_value, dec!(133_100));
}

// ===========================================================================
// Interest calculators
// ===========================================================================

#[test]
fn test_compound_interest_from_share_link() {
    let q = QueryParams::parse("?principal=200000&rate=6&years=2&frequency=12").unwrap();
    let input = CompoundInterestInput::from_query(&q);
    assert_eq!(input.frequency, 12);

    let out = calculate_compound_interest(&input).result;
    assert_eq!(out.yearly.len(), 2);
    // 200,000 × 1.005^24
    assert_eq!(out.total_amount, dec!(225431.96));
    assert_eq!(
        input.share_link().to_query_string(),
        "principal=200000&rate=6&years=2&frequency=12"
    );
}

#[test]
fn test_compound_beats_simple_over_same_term() {
    let ci = calculate_compound_interest(&CompoundInterestInput::default()).result;
    let si = calculate_simple_interest(&Default::default()).result;
    assert!(ci.compound_interest > si.simple_interest);
    assert_eq!(si.simple_interest, dec!(40_000));
}
