mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use fincalc_core::loans::emi::LoanProduct;

use commands::export::ExportArgs;
use commands::loans::{EligibilityArgs, EmiArgs, QuoteArgs};
use commands::savings::{
    CompoundInterestArgs, FdArgs, LumpsumArgs, NpsArgs, PpfArgs, RdArgs, SimpleInterestArgs,
    SipArgs,
};
use commands::tax::{GratuityArgs, GstArgs, HraArgs, IncomeTaxArgs, SalaryArgs};

/// Loan, savings and tax calculators with decimal precision
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan, savings and tax calculators with decimal precision",
    long_about = "A CLI for everyday Indian personal-finance calculations with decimal \
                  precision. Supports EMIs and amortization schedules, loan eligibility, \
                  SIP, RD, PPF, NPS, fixed deposits, compound and simple interest, GST, \
                  HRA, gratuity, income tax and salary breakdowns."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Rate tables file (.json or .yaml) replacing the built-in FY2024-25 set
    #[arg(long, global = true)]
    tables: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Home loan EMI with amortization schedule
    Emi(EmiArgs),
    /// Personal loan EMI
    PersonalLoan(EmiArgs),
    /// Credit card EMI conversion
    CreditCardEmi(EmiArgs),
    /// Maximum loan for a given income
    LoanEligibility(EligibilityArgs),
    /// Whole-rupee EMI from principal, rate and tenure in years
    EmiQuote(QuoteArgs),
    /// Monthly systematic investment plan
    Sip(SipArgs),
    /// Recurring deposit maturity
    Rd(RdArgs),
    /// Public Provident Fund maturity
    Ppf(PpfArgs),
    /// National Pension System corpus and pension
    Nps(NpsArgs),
    /// One-time investment growth
    Lumpsum(LumpsumArgs),
    /// Fixed deposit maturity
    Fd(FdArgs),
    /// Compound interest with yearly breakdown
    CompoundInterest(CompoundInterestArgs),
    /// Simple interest with yearly breakdown
    SimpleInterest(SimpleInterestArgs),
    /// Add or remove GST
    Gst(GstArgs),
    /// HRA exemption
    Hra(HraArgs),
    /// Gratuity payable on leaving
    Gratuity(GratuityArgs),
    /// Income tax under the old regime
    IncomeTax(IncomeTaxArgs),
    /// CTC to in-hand salary
    Salary(SalaryArgs),
    /// Write a loan report sheet as CSV
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}: logger setup failed: {}", "warning".yellow().bold(), e);
    }
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tables = match input::tables::load_tables(cli.tables.as_deref()) {
        Ok(tables) => tables,
        Err(e) => fail(e),
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(LoanProduct::HomeLoan, args),
        Commands::PersonalLoan(args) => commands::loans::run_emi(LoanProduct::PersonalLoan, args),
        Commands::CreditCardEmi(args) => commands::loans::run_emi(LoanProduct::CreditCard, args),
        Commands::LoanEligibility(args) => commands::loans::run_eligibility(args, &tables),
        Commands::EmiQuote(args) => commands::loans::run_quote(args),
        Commands::Sip(args) => commands::savings::run_sip(args),
        Commands::Rd(args) => commands::savings::run_rd(args),
        Commands::Ppf(args) => commands::savings::run_ppf(args),
        Commands::Nps(args) => commands::savings::run_nps(args, &tables),
        Commands::Lumpsum(args) => commands::savings::run_lumpsum(args),
        Commands::Fd(args) => commands::savings::run_fd(args),
        Commands::CompoundInterest(args) => commands::savings::run_compound_interest(args),
        Commands::SimpleInterest(args) => commands::savings::run_simple_interest(args),
        Commands::Gst(args) => commands::tax::run_gst(args, &tables),
        Commands::Hra(args) => commands::tax::run_hra(args, &tables),
        Commands::Gratuity(args) => commands::tax::run_gratuity(args, &tables),
        Commands::IncomeTax(args) => commands::tax::run_income_tax(args, &tables),
        Commands::Salary(args) => commands::tax::run_salary(args, &tables),
        Commands::Export(args) => {
            if let Err(e) = commands::export::run_export(args) {
                fail(e);
            }
            return;
        }
        Commands::Version => {
            println!("fincalc {} (tables {})", env!("CARGO_PKG_VERSION"), tables.version);
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
