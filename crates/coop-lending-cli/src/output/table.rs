use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::cell;
use super::csv_out::SCHEDULE_COLUMNS;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => println!("{}", field_table(map, None)),
        },
        Value::Array(rows) => println!("{}", schedule_table(rows)),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            println!("{}", field_table(res_map, Some("schedule")));
            if let Some(Value::Array(rows)) = res_map.get("schedule") {
                println!("\n{}", schedule_table(rows));
            }
        }
        _ => println!("{}", field_table(envelope, None)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column Field/Value table, optionally leaving one key out.
pub(crate) fn field_table(map: &Map<String, Value>, skip: Option<&str>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if Some(key.as_str()) == skip {
            continue;
        }
        builder.push_record([key.as_str(), &cell(val)]);
    }
    builder.build()
}

/// One row per schedule period in ledger column order.
pub(crate) fn schedule_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS);
    for row in rows {
        let record: Vec<String> = SCHEDULE_COLUMNS
            .iter()
            .map(|c| row.get(*c).map(cell).unwrap_or_default())
            .collect();
        builder.push_record(record);
    }
    builder.build()
}
