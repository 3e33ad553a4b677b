use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::tables::RateTables;
use fincalc_core::tax::gratuity::{calculate_gratuity, GratuityInput};
use fincalc_core::tax::gst::{calculate_gst, GstInput, GstMode};
use fincalc_core::tax::hra::{calculate_hra, HraInput};
use fincalc_core::tax::income_tax::{calculate_income_tax, IncomeTaxInput};
use fincalc_core::tax::salary::{calculate_salary, SalaryInput};

use super::set;
use crate::input;

/// Arguments for GST
#[derive(Args)]
pub struct GstArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Price before GST (or including GST with --reverse)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// GST rate (%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// The amount already includes GST
    #[arg(long)]
    pub reverse: bool,
}

/// Arguments for HRA exemption
#[derive(Args)]
pub struct HraArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly basic salary
    #[arg(long)]
    pub basic: Option<Decimal>,

    /// Monthly dearness allowance
    #[arg(long)]
    pub da: Option<Decimal>,

    /// Monthly HRA received
    #[arg(long)]
    pub hra_received: Option<Decimal>,

    /// Monthly rent paid
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Rented home is outside Delhi, Mumbai, Kolkata and Chennai
    #[arg(long)]
    pub non_metro: bool,
}

/// Arguments for gratuity
#[derive(Args)]
pub struct GratuityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly basic salary
    #[arg(long)]
    pub basic: Option<Decimal>,

    /// Monthly dearness allowance
    #[arg(long)]
    pub da: Option<Decimal>,

    /// Completed years of service
    #[arg(long)]
    pub years: Option<u32>,

    /// Last drawn monthly salary (overrides basic + DA)
    #[arg(long)]
    pub last_salary: Option<Decimal>,
}

/// Arguments for income tax
#[derive(Args)]
pub struct IncomeTaxArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross annual income
    #[arg(long)]
    pub gross_income: Option<Decimal>,

    /// Section 80C investments
    #[arg(long = "section-80c")]
    pub section_80c: Option<Decimal>,

    /// Section 80D health insurance premium
    #[arg(long = "section-80d")]
    pub section_80d: Option<Decimal>,

    /// Section 80E education loan interest
    #[arg(long = "section-80e")]
    pub section_80e: Option<Decimal>,

    /// Section 80CCD(1B) NPS contribution
    #[arg(long = "section-80ccd-1b")]
    pub section_80ccd_1b: Option<Decimal>,

    /// Age of the taxpayer
    #[arg(long)]
    pub age: Option<u32>,
}

/// Arguments for the salary breakdown
#[derive(Args)]
pub struct SalaryArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual cost to company
    #[arg(long)]
    pub ctc: Option<Decimal>,

    /// Basic salary as % of CTC
    #[arg(long)]
    pub basic_percent: Option<Decimal>,

    /// Dearness allowance as % of CTC
    #[arg(long)]
    pub da_percent: Option<Decimal>,

    /// HRA as % of CTC
    #[arg(long)]
    pub hra_percent: Option<Decimal>,

    /// Other annual allowances
    #[arg(long)]
    pub other_allowances: Option<Decimal>,

    /// State for professional tax
    #[arg(long)]
    pub state: Option<String>,
}

pub fn run_gst(args: GstArgs, tables: &RateTables) -> Result<Value, Box<dyn std::error::Error>> {
    let gst: GstInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut gst = GstInput::default();
            set(&mut gst.amount, args.amount);
            set(&mut gst.rate_percent, args.rate);
            if args.reverse {
                gst.mode = GstMode::Reverse;
            }
            gst
        }
    };
    Ok(serde_json::to_value(calculate_gst(&gst, tables))?)
}

pub fn run_hra(args: HraArgs, tables: &RateTables) -> Result<Value, Box<dyn std::error::Error>> {
    let hra: HraInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut hra = HraInput::default();
            set(&mut hra.basic_salary, args.basic);
            set(&mut hra.dearness_allowance, args.da);
            set(&mut hra.hra_received, args.hra_received);
            set(&mut hra.rent_paid, args.rent);
            hra.metro = !args.non_metro;
            hra
        }
    };
    Ok(serde_json::to_value(calculate_hra(&hra, tables))?)
}

pub fn run_gratuity(
    args: GratuityArgs,
    tables: &RateTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let gratuity: GratuityInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut gratuity = GratuityInput::default();
            set(&mut gratuity.basic_salary, args.basic);
            set(&mut gratuity.dearness_allowance, args.da);
            set(&mut gratuity.years_of_service, args.years);
            set(&mut gratuity.last_month_salary, args.last_salary);
            gratuity
        }
    };
    Ok(serde_json::to_value(calculate_gratuity(&gratuity, tables))?)
}

pub fn run_income_tax(
    args: IncomeTaxArgs,
    tables: &RateTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let tax: IncomeTaxInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut tax = IncomeTaxInput::default();
            set(&mut tax.gross_income, args.gross_income);
            set(&mut tax.section_80c, args.section_80c);
            set(&mut tax.section_80d, args.section_80d);
            set(&mut tax.section_80e, args.section_80e);
            set(&mut tax.section_80ccd_1b, args.section_80ccd_1b);
            set(&mut tax.age, args.age);
            tax
        }
    };
    Ok(serde_json::to_value(calculate_income_tax(&tax, tables))?)
}

pub fn run_salary(
    args: SalaryArgs,
    tables: &RateTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let salary: SalaryInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut salary = SalaryInput::default();
            set(&mut salary.ctc, args.ctc);
            set(&mut salary.basic_percent, args.basic_percent);
            set(&mut salary.da_percent, args.da_percent);
            set(&mut salary.hra_percent, args.hra_percent);
            set(&mut salary.other_allowances, args.other_allowances);
            set(&mut salary.state, args.state);
            salary
        }
    };
    Ok(serde_json::to_value(calculate_salary(&salary, tables))?)
}
