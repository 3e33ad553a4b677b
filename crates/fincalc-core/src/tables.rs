//! Jurisdiction- and year-specific constants as versioned data.
//!
//! Every figure the tax and savings calculators depend on lives here so a new
//! financial year is a data change, not a code change. `RateTables::default()`
//! is the FY 2024-25 set.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FinCalcError;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

/// One band of a progressive schedule. `upper = None` is the open top band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub rate: Rate,
}

/// A progressive slab table applying from `min_age` upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabTable {
    pub label: String,
    pub min_age: u32,
    pub brackets: Vec<TaxBracket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxTables {
    /// Ordered by `min_age`; the last table whose `min_age` <= age applies.
    pub slabs: Vec<SlabTable>,
    pub cess_rate: Rate,
    /// Cess applies only when taxable income exceeds this amount.
    pub cess_threshold: Money,
    pub cap_80c: Money,
    pub cap_80ccd_1b: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstCategory {
    pub rate_percent: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HraTables {
    pub metro_share: Rate,
    pub non_metro_share: Rate,
    /// Share of basic+DA that rent must exceed before any exemption applies.
    pub rent_threshold_share: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratuityTables {
    pub min_service_years: u32,
    pub days_divisor: Decimal,
    pub ceiling: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpsTables {
    pub lumpsum_share: Rate,
    pub annuity_share: Rate,
    pub annuity_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityTables {
    pub salaried_emi_ratio: Rate,
    pub self_employed_emi_ratio: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollTables {
    pub epf_rate: Rate,
    /// Professional tax by state key; unknown states pay `default_professional_tax`.
    pub professional_tax: BTreeMap<String, Money>,
    pub default_professional_tax: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTables {
    pub version: String,
    pub income_tax: IncomeTaxTables,
    pub gst_categories: Vec<GstCategory>,
    pub hra: HraTables,
    pub gratuity: GratuityTables,
    pub nps: NpsTables,
    pub eligibility: EligibilityTables,
    pub payroll: PayrollTables,
}

fn bracket(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> TaxBracket {
    TaxBracket { lower, upper, rate }
}

impl Default for RateTables {
    fn default() -> Self {
        let professional_tax = ["delhi", "maharashtra", "karnataka", "tamilnadu", "telangana"]
            .into_iter()
            .map(|state| (state.to_string(), dec!(200)))
            .collect();

        RateTables {
            version: "FY2024-25".into(),
            income_tax: IncomeTaxTables {
                slabs: vec![
                    SlabTable {
                        label: "Individual (below 60)".into(),
                        min_age: 0,
                        brackets: vec![
                            bracket(dec!(0), Some(dec!(250_000)), dec!(0)),
                            bracket(dec!(250_000), Some(dec!(500_000)), dec!(0.05)),
                            bracket(dec!(500_000), Some(dec!(1_000_000)), dec!(0.20)),
                            bracket(dec!(1_000_000), None, dec!(0.30)),
                        ],
                    },
                    SlabTable {
                        label: "Senior citizen (60-79)".into(),
                        min_age: 60,
                        brackets: vec![
                            bracket(dec!(0), Some(dec!(300_000)), dec!(0)),
                            bracket(dec!(300_000), Some(dec!(500_000)), dec!(0.05)),
                            bracket(dec!(500_000), Some(dec!(1_000_000)), dec!(0.20)),
                            bracket(dec!(1_000_000), None, dec!(0.30)),
                        ],
                    },
                    SlabTable {
                        label: "Super senior citizen (80+)".into(),
                        min_age: 80,
                        brackets: vec![
                            bracket(dec!(0), Some(dec!(500_000)), dec!(0)),
                            bracket(dec!(500_000), Some(dec!(1_000_000)), dec!(0.20)),
                            bracket(dec!(1_000_000), None, dec!(0.30)),
                        ],
                    },
                ],
                cess_rate: dec!(0.04),
                cess_threshold: dec!(1_000_000),
                cap_80c: dec!(150_000),
                cap_80ccd_1b: dec!(50_000),
            },
            gst_categories: vec![
                GstCategory {
                    rate_percent: dec!(0),
                    category: "Nil GST".into(),
                },
                GstCategory {
                    rate_percent: dec!(5),
                    category: "Essential Items".into(),
                },
                GstCategory {
                    rate_percent: dec!(12),
                    category: "Regular Items".into(),
                },
                GstCategory {
                    rate_percent: dec!(18),
                    category: "Luxury Items".into(),
                },
                GstCategory {
                    rate_percent: dec!(28),
                    category: "Premium Luxury".into(),
                },
            ],
            hra: HraTables {
                metro_share: dec!(0.5),
                non_metro_share: dec!(0.4),
                rent_threshold_share: dec!(0.1),
            },
            gratuity: GratuityTables {
                min_service_years: 5,
                days_divisor: dec!(26),
                ceiling: dec!(2_000_000),
            },
            nps: NpsTables {
                lumpsum_share: dec!(0.6),
                annuity_share: dec!(0.4),
                annuity_rate: dec!(0.06),
            },
            eligibility: EligibilityTables {
                salaried_emi_ratio: dec!(0.45),
                self_employed_emi_ratio: dec!(0.35),
            },
            payroll: PayrollTables {
                epf_rate: dec!(0.12),
                professional_tax,
                default_professional_tax: Decimal::ZERO,
            },
        }
    }
}

fn check_share(name: &str, value: Rate) -> FinCalcResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(FinCalcError::TableError(format!(
            "{name} must be between 0 and 1, got {value}"
        )));
    }
    Ok(())
}

impl SlabTable {
    fn validate(&self) -> FinCalcResult<()> {
        let first = self.brackets.first().ok_or_else(|| {
            FinCalcError::TableError(format!("slab table '{}' has no brackets", self.label))
        })?;
        if !first.lower.is_zero() {
            return Err(FinCalcError::TableError(format!(
                "slab table '{}' must start at zero",
                self.label
            )));
        }
        for pair in self.brackets.windows(2) {
            match pair[0].upper {
                Some(upper) if upper == pair[1].lower && upper > pair[0].lower => {}
                _ => {
                    return Err(FinCalcError::TableError(format!(
                        "slab table '{}' has non-contiguous brackets at {}",
                        self.label, pair[1].lower
                    )))
                }
            }
        }
        if let Some(last) = self.brackets.last() {
            if last.upper.is_some() {
                return Err(FinCalcError::TableError(format!(
                    "slab table '{}' must end with an open bracket",
                    self.label
                )));
            }
        }
        for b in &self.brackets {
            check_share("bracket rate", b.rate)?;
        }
        Ok(())
    }
}

impl RateTables {
    /// Check structural invariants after loading tables from a file.
    pub fn validate(&self) -> FinCalcResult<()> {
        if self.income_tax.slabs.is_empty() {
            return Err(FinCalcError::TableError("no income-tax slab tables".into()));
        }
        if self.income_tax.slabs[0].min_age != 0 {
            return Err(FinCalcError::TableError(
                "first slab table must apply from age 0".into(),
            ));
        }
        for pair in self.income_tax.slabs.windows(2) {
            if pair[1].min_age <= pair[0].min_age {
                return Err(FinCalcError::TableError(
                    "slab tables must be ordered by ascending min_age".into(),
                ));
            }
        }
        for slab in &self.income_tax.slabs {
            slab.validate()?;
        }
        check_share("cess_rate", self.income_tax.cess_rate)?;
        check_share("hra.metro_share", self.hra.metro_share)?;
        check_share("hra.non_metro_share", self.hra.non_metro_share)?;
        check_share("hra.rent_threshold_share", self.hra.rent_threshold_share)?;
        check_share("nps.lumpsum_share", self.nps.lumpsum_share)?;
        check_share("nps.annuity_share", self.nps.annuity_share)?;
        check_share("nps.annuity_rate", self.nps.annuity_rate)?;
        check_share("eligibility.salaried_emi_ratio", self.eligibility.salaried_emi_ratio)?;
        check_share(
            "eligibility.self_employed_emi_ratio",
            self.eligibility.self_employed_emi_ratio,
        )?;
        check_share("payroll.epf_rate", self.payroll.epf_rate)?;
        if self.gratuity.days_divisor <= Decimal::ZERO {
            return Err(FinCalcError::TableError(
                "gratuity.days_divisor must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The slab table that applies at `age`.
    pub fn slab_for_age(&self, age: u32) -> Option<&SlabTable> {
        self.income_tax
            .slabs
            .iter()
            .rev()
            .find(|slab| slab.min_age <= age)
    }

    /// Category label for a GST rate, if it is one of the standard rates.
    pub fn gst_category(&self, rate_percent: Decimal) -> Option<&str> {
        self.gst_categories
            .iter()
            .find(|c| c.rate_percent == rate_percent)
            .map(|c| c.category.as_str())
    }
}
