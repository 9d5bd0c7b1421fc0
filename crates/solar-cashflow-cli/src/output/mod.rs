pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The model payload of an envelope: its `summary` object and `schedule` rows.
pub(crate) fn model_sections(value: &Value) -> Option<(&serde_json::Map<String, Value>, &[Value])> {
    let result = value.get("result")?;
    let summary = result.get("summary")?.as_object()?;
    let schedule = result.get("schedule")?.as_array()?.as_slice();
    Some((summary, schedule))
}

/// Render a scalar for display. Decimal strings are rounded: prices and
/// rates to 4 places, everything else to 2.
pub(crate) fn display_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => d.round_dp(places_for(key)).to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| display_value(key, v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn places_for(key: &str) -> u32 {
    if key.contains("price") || key.contains("rate") || key.contains("per_kwh") || key == "irr" {
        4
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_rounding() {
        assert_eq!(display_value("electricity_price", &json!("0.153781")), "0.1538");
        assert_eq!(display_value("revenue", &json!("2100.456")), "2100.46");
        assert_eq!(display_value("irr", &json!("0.1234567")), "0.1235");
        assert_eq!(display_value("irr", &Value::Null), "");
        assert_eq!(display_value("location", &json!("Ohio")), "Ohio");
        assert_eq!(display_value("year", &json!(3)), "3");
    }

    #[test]
    fn test_model_sections() {
        let value = json!({
            "result": { "summary": { "npv": "1" }, "schedule": [{ "year": 0 }] },
            "warnings": []
        });
        let (summary, schedule) = model_sections(&value).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(schedule.len(), 1);
        assert!(model_sections(&json!([1, 2])).is_none());
    }
}
