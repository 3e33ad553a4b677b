use serde_json::Value;
use std::io;

use super::{format_scalar, is_row_list};

/// Write the scalar result fields as two-column CSV to stdout.
///
/// Schedules are left out; `fincalc export` writes those as proper sheets.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let fields = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => Some(result),
            _ => Some(map),
        },
        _ => None,
    };

    match fields {
        Some(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                if is_row_list(val) || val.is_object() {
                    continue;
                }
                let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
            }
        }
        None => {
            let _ = wtr.write_record([&format_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}
