//! Tabular views of a loan calculation for spreadsheet and PDF writers.

use serde::{Deserialize, Serialize};

use crate::loans::emi::EmiOutput;

/// One named sheet: a header row plus string cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Sheet {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Summary, year-wise and monthly sheets for an EMI result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub summary: Sheet,
    pub yearly: Sheet,
    pub monthly: Sheet,
}

/// `"20 years 0 months"` for 240 months.
pub fn tenure_label(months: u32) -> String {
    format!("{} years {} months", months / 12, months % 12)
}

impl LoanReport {
    pub fn from_output(out: &EmiOutput) -> Self {
        let mut summary = Sheet::new("Summary", &["Field", "Value"]);
        let fields = [
            ("Loan Amount", out.principal.normalize().to_string()),
            (
                "Annual Interest Rate (%)",
                out.annual_rate_percent.normalize().to_string(),
            ),
            ("Loan Tenure (Months)", out.months.to_string()),
            ("Loan Tenure (Years)", tenure_label(out.months)),
            ("Monthly EMI", out.emi.to_string()),
            ("Total Interest", out.total_interest.to_string()),
            ("Total Amount Payable", out.total_amount.to_string()),
            ("Principal", out.principal.normalize().to_string()),
        ];
        for (label, value) in fields {
            summary.push(vec![label.to_string(), value]);
        }

        let mut yearly = Sheet::new(
            "Year-wise",
            &["Year", "Principal Paid", "Interest Paid", "Total EMI", "Balance"],
        );
        for y in &out.yearly_summary {
            yearly.push(vec![
                y.year.to_string(),
                y.principal_component.to_string(),
                y.interest_component.to_string(),
                y.payment_total.to_string(),
                y.ending_balance.to_string(),
            ]);
        }

        let mut monthly = Sheet::new(
            "Monthly Schedule",
            &["Month", "EMI", "Principal", "Interest", "Balance"],
        );
        for row in &out.schedule {
            monthly.push(vec![
                row.period.to_string(),
                row.payment.to_string(),
                row.principal_component.to_string(),
                row.interest_component.to_string(),
                row.ending_balance.to_string(),
            ]);
        }

        LoanReport {
            summary,
            yearly,
            monthly,
        }
    }

    /// Sheets in workbook order.
    pub fn sheets(&self) -> [&Sheet; 3] {
        [&self.summary, &self.yearly, &self.monthly]
    }
}
