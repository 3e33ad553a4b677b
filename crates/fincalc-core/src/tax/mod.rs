pub mod gratuity;
pub mod gst;
pub mod hra;
pub mod income_tax;
pub mod salary;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tables::SlabTable;
use crate::types::*;

/// Tax charged within one band of a slab table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabTax {
    pub lower: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub rate_percent: Decimal,
    /// Portion of taxable income falling inside this band.
    pub income_in_slab: Money,
    pub tax: Money,
}

/// Walk `taxable` through a progressive slab table.
///
/// Returns the total tax at full precision and one line per band that the
/// income reaches, including zero-rate bands.
pub(crate) fn slab_tax(taxable: Money, table: &SlabTable) -> (Money, Vec<SlabTax>) {
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();

    for band in &table.brackets {
        if taxable <= band.lower {
            break;
        }
        let top = match band.upper {
            Some(upper) => taxable.min(upper),
            None => taxable,
        };
        let income_in_slab = top - band.lower;
        let tax = income_in_slab * band.rate;
        total += tax;
        lines.push(SlabTax {
            lower: band.lower,
            upper: band.upper,
            rate_percent: band.rate * dec!(100),
            income_in_slab: round2(income_in_slab),
            tax: round2(tax),
        });
    }

    (total, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::RateTables;
    use rust_decimal_macros::dec;

    #[test]
    fn test_slab_walk_under_sixty() {
        let tables = RateTables::default();
        let table = tables.slab_for_age(30).unwrap();

        let (tax, lines) = slab_tax(dec!(825_000), table);
        assert_eq!(tax, dec!(77_500));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].tax, dec!(12_500));
        assert_eq!(lines[2].income_in_slab, dec!(325_000));
    }

    #[test]
    fn test_slab_walk_below_exemption() {
        let tables = RateTables::default();
        let (tax, lines) = slab_tax(dec!(240_000), tables.slab_for_age(30).unwrap());
        assert_eq!(tax, Decimal::ZERO);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_slab_walk_zero_income() {
        let tables = RateTables::default();
        let (tax, lines) = slab_tax(Decimal::ZERO, tables.slab_for_age(85).unwrap());
        assert_eq!(tax, Decimal::ZERO);
        assert!(lines.is_empty());
    }
}
