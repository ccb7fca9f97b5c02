use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Looks for the headline field of each command in priority order, then
/// falls back to the first field of the result object.
pub fn print_minimal(value: &Value) {
    // Formatted currency wins over the raw decimal when present
    if let Some(monthly) = value
        .get("display")
        .and_then(|d| d.get("monthly_repayment"))
        .and_then(Value::as_str)
    {
        println!("{}", monthly);
        return;
    }

    let result_obj = value.get("result").unwrap_or(value);

    let priority_keys = ["monthly_repayment", "formatted", "valid"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
