//! Output pipeline: explicit record/orientation/sink configuration applied
//! to a canonical table, then handed to one of the three sinks.

use anyhow::Result;

use crate::process::table::{Table, Value};
use crate::report::ReportType;

pub mod excel;
pub mod json;
pub mod text;

/// Where a canonical table ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sink {
    #[default]
    Text,
    Json,
    Excel,
}

impl Sink {
    /// Excel and JSON want typed numbers; plain display keeps raw text.
    pub fn needs_numeric(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Per-run output configuration, replacing the ambient flags of the
/// original script with one explicit value.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// 1-based single record to isolate, validated before slicing.
    pub record: Option<usize>,
    /// Wide orientation: one row per record under a label header. The
    /// default (tall) prints one labelled line per column.
    pub transpose: bool,
    pub sink: Sink,
}

/// Slice and serialize one canonical table.
pub fn emit(
    mut table: Table,
    report: ReportType,
    symbol: &str,
    timestamp: &str,
    cfg: &OutputConfig,
) -> Result<()> {
    if let Some(record) = cfg.record {
        table.slice_record(record)?;
    }
    match cfg.sink {
        Sink::Text => text::write_stdout(&table, cfg.transpose),
        Sink::Json => json::write_stdout(&table, report, symbol)?,
        Sink::Excel => excel::write_workbook(&table, report, symbol, timestamp, cfg.transpose)?,
    }
    Ok(())
}

/// Display grid derived from a canonical table: an optional header row of
/// labels plus value rows.
#[derive(Debug, PartialEq)]
pub struct Grid {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<Value>>,
}

/// Tall (default) orientation puts one line per column — label first, then
/// that column's value from each record — with no header row. Wide
/// (`transpose`) keeps the canonical rows under a label header.
pub fn render_grid(table: &Table, transpose: bool) -> Grid {
    if transpose {
        Grid {
            header: Some(table.columns.iter().map(|c| c.label.clone()).collect()),
            rows: table.rows.clone(),
        }
    } else {
        let rows = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let mut line = vec![Value::Text(col.label.clone())];
                line.extend(table.rows.iter().map(|row| row[i].clone()));
                line
            })
            .collect();
        Grid { header: None, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::table::assign_identities;

    fn sample() -> Table {
        Table {
            columns: assign_identities(["Date", "Total Revenue"]),
            rows: vec![
                vec![Value::Text("2021".into()), Value::Number(1000.0)],
                vec![Value::Text("2020".into()), Value::Number(900.0)],
            ],
        }
    }

    #[test]
    fn tall_grid_puts_labels_down_the_first_column() {
        let grid = render_grid(&sample(), false);
        assert_eq!(grid.header, None);
        assert_eq!(
            grid.rows[0],
            vec![
                Value::Text("Date".into()),
                Value::Text("2021".into()),
                Value::Text("2020".into()),
            ]
        );
        assert_eq!(
            grid.rows[1],
            vec![
                Value::Text("Total Revenue".into()),
                Value::Number(1000.0),
                Value::Number(900.0),
            ]
        );
    }

    #[test]
    fn wide_grid_keeps_canonical_rows_under_a_header() {
        let grid = render_grid(&sample(), true);
        assert_eq!(
            grid.header,
            Some(vec!["Date".to_string(), "Total Revenue".to_string()])
        );
        assert_eq!(grid.rows, sample().rows);
    }

    #[test]
    fn emit_rejects_out_of_range_record_before_serializing() {
        let cfg = OutputConfig {
            record: Some(5),
            transpose: false,
            sink: Sink::Text,
        };
        let err = emit(sample(), ReportType::IncomeStatement, "AAPL", "20200508", &cfg)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
