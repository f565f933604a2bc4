//! Numeric coercion for sinks that need typed values.

use super::table::{Table, Value};
use crate::error::{Result, ScrapeError};

/// Convert every text cell outside the `Date` column to f64 in place,
/// stripping thousands separators first. Missing markers stay missing.
/// Only run for the Excel and JSON sinks; silently wrong financial figures
/// are worse than a hard stop, so any unparseable cell aborts the pass.
///
/// The exemption goes by column identity, not label: the promoted `Date`
/// column is always ordinal 0, and a metric that happens to be labelled
/// "Date" must still be coerced.
pub fn coerce_numeric(table: &mut Table) -> Result<()> {
    for row in &mut table.rows {
        for (col, cell) in table.columns.iter().zip(row.iter_mut()) {
            if col.ordinal == 0 {
                continue;
            }
            if let Value::Text(text) = cell {
                let n = parse_number(text).ok_or_else(|| ScrapeError::MalformedNumber {
                    column: col.label.clone(),
                    value: text.clone(),
                })?;
                *cell = Value::Number(n);
            }
        }
    }
    Ok(())
}

/// "1,234.50" → 1234.5; placeholders like "N/A" fail.
fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', "").trim().parse().ok()
}
