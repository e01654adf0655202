use serde_json::{Map, Value};

/// Key answer fields, in priority order. Searched in the result, then in its summary.
const PRIORITY_KEYS: [&str; 6] = [
    "first_payment",
    "interest_difference",
    "total_paid",
    "path",
    "removed_index",
    "installment_count",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let summary = map.get("summary").and_then(Value::as_object);
        for scope in std::iter::once(map).chain(summary) {
            if let Some(val) = priority_value(scope) {
                return format_minimal(val);
            }
        }
        if let Some(Value::Array(rows)) = map.get("results") {
            return rows.len().to_string();
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn priority_value(map: &Map<String, Value>) -> Option<&Value> {
    PRIORITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
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
