//! Indian-locale number presentation (`₹12,34,567`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Group an unsigned digit string as 12,34,56,789.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Whole-rupee figure with Indian digit grouping and no symbol.
pub fn format_number(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_indian(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Whole-rupee figure with the ₹ symbol, e.g. `format_inr(2_000_000) == "₹20,00,000"`.
pub fn format_inr(value: Decimal) -> String {
    let n = format_number(value);
    match n.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(dec!(2_000_000)), "₹20,00,000");
        assert_eq!(format_inr(dec!(17356.46)), "₹17,356");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(123_456_789)), "₹12,34,56,789");
        assert_eq!(format_number(dec!(1000)), "1,000");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_inr(dec!(0.5)), "₹1");
        assert_eq!(format_inr(dec!(-1234.5)), "-₹1,235");
        assert_eq!(format_inr(dec!(-0.4)), "₹0");
        assert_eq!(format_number(dec!(2165551.52)), "21,65,552");
    }
}
