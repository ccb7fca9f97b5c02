use serde_json::{Map, Value};
use std::io;

/// Write output as two-column CSV (field, value) to stdout.
///
/// For calculation envelopes the result fields come first, followed by the
/// formatted display values prefixed with `display.`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = wtr.write_record(["field", "value"]);

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                write_fields(&mut wtr, "", result);
                if let Some(Value::Object(display)) = map.get("display") {
                    write_fields(&mut wtr, "display.", display);
                }
            } else {
                write_fields(&mut wtr, "", map);
            }
        }
        _ => {
            let _ = wtr.write_record(["value", format_csv_value(value).as_str()]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    prefix: &str,
    map: &Map<String, Value>,
) {
    for (key, val) in map {
        match val {
            Value::Object(nested) if !nested.is_empty() => {
                write_fields(wtr, &format!("{prefix}{key}."), nested);
            }
            _ => {
                let _ = wtr.write_record([format!("{prefix}{key}"), format_csv_value(val)]);
            }
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
