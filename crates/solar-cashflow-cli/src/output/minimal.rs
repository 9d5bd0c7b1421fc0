use serde_json::Value;

use super::{display_value, model_sections};

/// Print just the headline value.
///
/// Model runs print the NPV. Location lists print one name per line.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{}", line);
    }
}

fn minimal_lines(value: &Value) -> Vec<String> {
    if let Some((summary, _)) = model_sections(value) {
        let npv = summary.get("npv").unwrap_or(&Value::Null);
        return vec![display_value("npv", npv)];
    }

    match value {
        Value::Array(arr) => arr
            .iter()
            .map(|item| match item.get("name") {
                Some(name) => display_value("name", name),
                None => display_value("", item),
            })
            .collect(),
        _ => vec![display_value("", value)],
    }
}
