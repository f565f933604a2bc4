//! Reshapes raw extraction output into the two canonical schemas.

use super::table::{assign_identities, Table, Value};
use super::{RawTable, SummaryPage};

/// The fields prepended to every summary record, in fixed order, ahead of
/// whatever the page listing contains.
pub const SYNTHESIZED_FIELDS: [&str; 4] =
    ["Current Price", "Query Timestamp", "Market Notice", "Change"];

/// Reshape a statement grid (rows = metrics, columns = periods, as emitted
/// by the page) into the canonical schema: one row per reporting period, a
/// `Date` column first, then one identified column per metric in source
/// order.
///
/// Column 0 of every raw row is promoted to that metric's label and removed
/// from the value grid before the transpose. The promoted header label
/// ("Breakdown") is replaced by `Date`, since after the transpose that
/// column holds the period labels.
pub fn reshape_statement(raw: RawTable) -> Table {
    let mut labels: Vec<String> = Vec::with_capacity(raw.rows.len());
    let mut grid: Vec<Vec<Option<String>>> = Vec::with_capacity(raw.rows.len());
    for mut row in raw.rows {
        let label = if row.is_empty() { None } else { row.remove(0) };
        labels.push(label.unwrap_or_default());
        grid.push(row);
    }

    // Transpose: one output row per period, padding ragged metric rows.
    let periods = grid.iter().map(Vec::len).max().unwrap_or(0);
    let rows: Vec<Vec<Value>> = (0..periods)
        .map(|p| {
            grid.iter()
                .map(|metric| Value::from_cell(metric.get(p).cloned().flatten()))
                .collect()
        })
        .collect();

    if !labels.is_empty() {
        labels[0] = "Date".to_string();
    }
    Table {
        columns: assign_identities(labels),
        rows,
    }
}

/// Build the single-record summary table: the four synthesized fields
/// first, then each discovered pair in listing order. Duplicate discovered
/// labels are kept as-is; identity is positional.
pub fn reshape_summary(page: SummaryPage, timestamp: &str) -> Table {
    let mut labels: Vec<String> = SYNTHESIZED_FIELDS.iter().map(|s| s.to_string()).collect();
    let mut row = vec![
        Value::Text(page.price),
        Value::Text(timestamp.to_string()),
        Value::Text(page.market_notice),
        Value::Text(page.change),
    ];
    for (label, value) in page.pairs {
        labels.push(label);
        row.push(Value::Text(value));
    }
    Table {
        columns: assign_identities(labels),
        rows: vec![row],
    }
}
