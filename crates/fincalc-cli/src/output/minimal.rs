use serde_json::Value;

use super::format_scalar;

/// Result fields tried in order; the first present one is the headline figure.
const PRIORITY_KEYS: [&str; 11] = [
    "emi",
    "max_eligible_loan",
    "maturity_amount",
    "future_value",
    "monthly_pension",
    "final_price",
    "exemption",
    "gratuity",
    "total_tax",
    "monthly_in_hand",
    "total_amount",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_scalar(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emi_wins_over_total_amount() {
        let value = json!({
            "result": {"total_amount": "4165551.52", "emi": "17356.46"},
            "warnings": []
        });
        assert_eq!(headline(&value), "17356.46");
    }

    #[test]
    fn test_bare_quote_response() {
        assert_eq!(headline(&json!({"emi": 17356})), "17356");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let value = json!({"result": {"base_salary": "55000"}});
        assert_eq!(headline(&value), "base_salary: 55000");
    }
}
