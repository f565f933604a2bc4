//! Structured JSON document on stdout.

use anyhow::Result;
use serde_json::{json, Value as Json};

use crate::process::table::{Table, Value};
use crate::report::ReportType;

pub fn write_stdout(table: &Table, report: ReportType, symbol: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&document(table, report, symbol))?);
    Ok(())
}

/// Serialize the canonical table with its column identities intact. JSON
/// objects cannot hold duplicate keys, so columns are a list of
/// `{ordinal, label}` pairs and rows are positional value arrays.
pub fn document(table: &Table, report: ReportType, symbol: &str) -> Json {
    let data: Vec<Vec<Json>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(cell_json).collect())
        .collect();
    json!({
        "COMPANY": symbol,
        "TYPE": report.label(),
        "columns": table.columns,
        "data": data,
    })
}

fn cell_json(value: &Value) -> Json {
    match value {
        Value::Missing => Json::Null,
        Value::Text(text) => json!(text),
        Value::Number(n) => json!(n),
    }
}
