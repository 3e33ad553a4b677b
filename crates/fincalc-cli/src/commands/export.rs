use clap::{Args, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, Write};

use fincalc_core::loans::emi::{calculate_emi, LoanProduct};
use fincalc_core::report::{LoanReport, Sheet};

use super::loans::{resolve_emi_input, EmiArgs, ProductArg};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SheetArg {
    Summary,
    Yearly,
    Monthly,
}

/// Arguments for exporting a loan report sheet
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: EmiArgs,

    /// Loan product whose defaults fill unset fields
    #[arg(long, default_value = "home")]
    pub product: ProductArg,

    /// Which sheet of the report to write
    #[arg(long, default_value = "monthly")]
    pub sheet: SheetArg,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

/// Write one sheet of the loan report as CSV.
pub fn run_export(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let product: LoanProduct = args.product.into();
    let loan = resolve_emi_input(product, &args.loan)?;
    let output = calculate_emi(product, &loan);
    for warning in &output.warnings {
        log::warn!("{}", warning);
    }

    let report = LoanReport::from_output(&output.result);
    let sheet = match args.sheet {
        SheetArg::Summary => &report.summary,
        SheetArg::Yearly => &report.yearly,
        SheetArg::Monthly => &report.monthly,
    };

    match &args.out {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            write_sheet(sheet, file)?;
            info!("wrote {} rows of '{}' to {}", sheet.rows.len(), sheet.name, path);
        }
        None => write_sheet(sheet, io::stdout().lock())?,
    }
    Ok(())
}

fn write_sheet<W: Write>(sheet: &Sheet, writer: W) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
