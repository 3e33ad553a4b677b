use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::tables::RateTables;
use crate::time_value::{amounts_in_range, percents_in_range, MAX_AMOUNT};
use crate::types::*;

/// Whether the entered price excludes GST (forward) or already includes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstMode {
    #[default]
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstInput {
    pub amount: Money,
    pub rate_percent: Percent,
    #[serde(default)]
    pub mode: GstMode,
}

impl Default for GstInput {
    fn default() -> Self {
        GstInput {
            amount: dec!(10_000),
            rate_percent: dec!(18),
            mode: GstMode::Forward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub base_price: Money,
    pub gst_amount: Money,
    pub final_price: Money,
    /// Central and state halves of an intra-state levy.
    pub cgst: Money,
    pub sgst: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Add GST to a net price, or pull it out of a gross one.
pub fn calculate_gst(input: &GstInput, tables: &RateTables) -> ComputationOutput<GstOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let category = tables.gst_category(input.rate_percent).map(str::to_string);
    if category.is_none() {
        warnings.push(format!(
            "{}% is not a standard GST rate",
            input.rate_percent.normalize()
        ));
    }

    let in_range =
        amounts_in_range(&[input.amount]) && percents_in_range(&[input.rate_percent]);
    let output = if !in_range {
        let reason =
            format!("Amount must be between 0 and {MAX_AMOUNT} and the GST rate between 0 and 100%");
        warn!("GST: falling back to zero result: {reason}");
        warnings.push(reason.clone());
        GstOutput {
            valid: false,
            message: Some(reason),
            base_price: Decimal::ZERO,
            gst_amount: Decimal::ZERO,
            final_price: Decimal::ZERO,
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            category,
        }
    } else {
        let rate = input.rate_percent / dec!(100);
        let (base, gst, gross) = match input.mode {
            GstMode::Forward => {
                let gst = input.amount * rate;
                (input.amount, gst, input.amount + gst)
            }
            GstMode::Reverse => {
                let base = input.amount / (Decimal::ONE + rate);
                (base, input.amount - base, input.amount)
            }
        };
        let gst_amount = round2(gst);
        let cgst = round2(gst / dec!(2));
        GstOutput {
            valid: true,
            message: None,
            base_price: round2(base),
            gst_amount,
            final_price: round2(gross),
            cgst,
            sgst: gst_amount - cgst,
            category,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let methodology = match input.mode {
        GstMode::Forward => "GST forward (final = price × (1 + rate))",
        GstMode::Reverse => "GST reverse (base = price / (1 + rate))",
    };
    with_metadata(methodology, input, warnings, elapsed, output).with_tables_version(&tables.version)
}
