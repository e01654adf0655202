pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

/// Per-period series carried by a result, in priority order.
const SERIES_KEYS: [&str; 3] = ["installments", "periods", "results"];

/// The first array-of-objects series in a result object, with its key.
pub(crate) fn row_series(map: &serde_json::Map<String, Value>) -> Option<(&str, &[Value])> {
    SERIES_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::Array(rows)) if rows.first().map_or(true, Value::is_object) => {
            Some((*key, rows.as_slice()))
        }
        _ => None,
    })
}

/// Shorten decimal strings for human display: cents for amounts, eight places for rates.
pub(crate) fn display_decimal(s: &str) -> Option<String> {
    let d: Decimal = s.parse().ok()?;
    let dp = if d.abs() >= Decimal::ONE { 2 } else { 8 };
    Some(d.round_dp(dp).normalize().to_string())
}
