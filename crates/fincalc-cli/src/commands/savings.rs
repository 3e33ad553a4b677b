use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::query::QueryParams;
use fincalc_core::savings::deposits::{
    calculate_fd, calculate_lumpsum, Compounding, FdInput, LumpsumInput,
};
use fincalc_core::savings::interest::{
    calculate_compound_interest, calculate_simple_interest, CompoundInterestInput,
    SimpleInterestInput,
};
use fincalc_core::savings::nps::{calculate_nps, NpsInput};
use fincalc_core::savings::sip::{
    calculate_ppf, calculate_rd, calculate_sip, PpfInput, RdInput, SipInput,
};
use fincalc_core::tables::RateTables;

use super::set;
use crate::input;

/// Arguments for a monthly SIP
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly investment
    #[arg(long)]
    pub monthly_amount: Option<Decimal>,

    /// Expected annual return (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment period in years
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for a recurring deposit
#[derive(Args)]
pub struct RdArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly deposit
    #[arg(long)]
    pub monthly_deposit: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit period in months
    #[arg(long)]
    pub months: Option<u32>,
}

/// Arguments for PPF
#[derive(Args)]
pub struct PpfArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Yearly deposit
    #[arg(long)]
    pub annual_deposit: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of yearly deposits
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for NPS
#[derive(Args)]
pub struct NpsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly contribution
    #[arg(long)]
    pub monthly_contribution: Option<Decimal>,

    /// Current age
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Retirement age
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Expected annual return (%)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

/// Arguments for a one-time investment
#[derive(Args)]
pub struct LumpsumArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested today
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Expected annual return (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Holding period in years
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompoundingArg {
    Monthly,
    Quarterly,
    Annual,
}

impl From<CompoundingArg> for Compounding {
    fn from(arg: CompoundingArg) -> Self {
        match arg {
            CompoundingArg::Monthly => Compounding::Monthly,
            CompoundingArg::Quarterly => Compounding::Quarterly,
            CompoundingArg::Annual => Compounding::Annual,
        }
    }
}

/// Arguments for a fixed deposit
#[derive(Args)]
pub struct FdArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Deposit amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit period in months
    #[arg(long)]
    pub months: Option<u32>,

    /// How often interest is credited
    #[arg(long)]
    pub compounding: Option<CompoundingArg>,
}

/// Arguments for compound interest
#[derive(Args)]
pub struct CompoundInterestArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Share-link query, e.g. "principal=100000&rate=8&years=5&frequency=4"
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding periods per year
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Attach a share link on this base URL to the output
    #[arg(long)]
    pub share_url: Option<String>,
}

/// Arguments for simple interest
#[derive(Args)]
pub struct SimpleInterestArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Share-link query, e.g. "principal=100000&rate=8&years=5"
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub years: Option<u32>,

    /// Attach a share link on this base URL to the output
    #[arg(long)]
    pub share_url: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip: SipInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut sip = SipInput::default();
            set(&mut sip.monthly_amount, args.monthly_amount);
            set(&mut sip.annual_return_percent, args.rate);
            set(&mut sip.years, args.years);
            sip
        }
    };
    Ok(serde_json::to_value(calculate_sip(&sip))?)
}

pub fn run_rd(args: RdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rd: RdInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut rd = RdInput::default();
            set(&mut rd.monthly_deposit, args.monthly_deposit);
            set(&mut rd.annual_rate_percent, args.rate);
            set(&mut rd.months, args.months);
            rd
        }
    };
    Ok(serde_json::to_value(calculate_rd(&rd))?)
}

pub fn run_ppf(args: PpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ppf: PpfInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut ppf = PpfInput::default();
            set(&mut ppf.annual_deposit, args.annual_deposit);
            set(&mut ppf.annual_rate_percent, args.rate);
            set(&mut ppf.years, args.years);
            ppf
        }
    };
    Ok(serde_json::to_value(calculate_ppf(&ppf))?)
}

pub fn run_nps(args: NpsArgs, tables: &RateTables) -> Result<Value, Box<dyn std::error::Error>> {
    let nps: NpsInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut nps = NpsInput::default();
            set(&mut nps.monthly_contribution, args.monthly_contribution);
            set(&mut nps.current_age, args.current_age);
            set(&mut nps.retirement_age, args.retirement_age);
            set(&mut nps.expected_return_percent, args.rate);
            nps
        }
    };
    Ok(serde_json::to_value(calculate_nps(&nps, tables))?)
}

pub fn run_lumpsum(args: LumpsumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lumpsum: LumpsumInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut lumpsum = LumpsumInput::default();
            set(&mut lumpsum.investment_amount, args.amount);
            set(&mut lumpsum.annual_return_percent, args.rate);
            set(&mut lumpsum.years, args.years);
            lumpsum
        }
    };
    Ok(serde_json::to_value(calculate_lumpsum(&lumpsum))?)
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fd: FdInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut fd = FdInput::default();
            set(&mut fd.principal, args.principal);
            set(&mut fd.annual_rate_percent, args.rate);
            set(&mut fd.months, args.months);
            set(&mut fd.compounding, args.compounding.map(Compounding::from));
            fd
        }
    };
    Ok(serde_json::to_value(calculate_fd(&fd))?)
}

pub fn run_compound_interest(
    args: CompoundInterestArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let ci: CompoundInterestInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut ci = match &args.query {
                Some(query) => CompoundInterestInput::from_query(&QueryParams::parse(query)?),
                None => CompoundInterestInput::default(),
            };
            set(&mut ci.principal, args.principal);
            set(&mut ci.annual_rate_percent, args.rate);
            set(&mut ci.years, args.years);
            set(&mut ci.frequency, args.frequency);
            ci
        }
    };

    let mut value = serde_json::to_value(calculate_compound_interest(&ci))?;
    if let (Some(base), Value::Object(map)) = (&args.share_url, &mut value) {
        map.insert("share_url".into(), Value::String(ci.share_link().to_url(base)));
    }
    Ok(value)
}

pub fn run_simple_interest(
    args: SimpleInterestArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let si: SimpleInterestInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut si = match &args.query {
                Some(query) => SimpleInterestInput::from_query(&QueryParams::parse(query)?),
                None => SimpleInterestInput::default(),
            };
            set(&mut si.principal, args.principal);
            set(&mut si.annual_rate_percent, args.rate);
            set(&mut si.years, args.years);
            si
        }
    };

    let mut value = serde_json::to_value(calculate_simple_interest(&si))?;
    if let (Some(base), Value::Object(map)) = (&args.share_url, &mut value) {
        map.insert("share_url".into(), Value::String(si.share_link().to_url(base)));
    }
    Ok(value)
}
