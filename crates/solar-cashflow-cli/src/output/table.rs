use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_value, model_sections};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some((summary, schedule)) = model_sections(value) {
        print_field_table(summary);
        println!();
        print_rows(schedule);
        if let Value::Object(envelope) = value {
            print_notes(envelope);
        }
        return;
    }

    match value {
        Value::Object(map) => print_field_table(map),
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &display_value(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(|v| display_value(h, v)).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
