//! Excel workbook sink.

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use tracing::info;

use super::render_grid;
use crate::process::table::{Table, Value};
use crate::report::ReportType;

/// Write the table to `SYMBOL-Report_Type-TIMESTAMP.xlsx` in the working
/// directory, one sheet named after the report type.
pub fn write_workbook(
    table: &Table,
    report: ReportType,
    symbol: &str,
    timestamp: &str,
    transpose: bool,
) -> Result<()> {
    let path = workbook_path(symbol, report, timestamp);
    save_workbook(table, report, transpose, &path)?;
    info!(%path, "wrote workbook");
    println!("Writing {path}");
    Ok(())
}

pub fn workbook_path(symbol: &str, report: ReportType, timestamp: &str) -> String {
    format!("{symbol}-{}-{timestamp}.xlsx", report.label().replace(' ', "_"))
}

fn save_workbook(table: &Table, report: ReportType, transpose: bool, path: &str) -> Result<()> {
    let grid = render_grid(table, transpose);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(report.label())?;

    let mut r: u32 = 0;
    if let Some(header) = &grid.header {
        for (c, label) in header.iter().enumerate() {
            sheet.write_string(r, c as u16, label)?;
        }
        r += 1;
    }
    for row in &grid.rows {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Value::Missing => {}
                Value::Text(text) => {
                    sheet.write_string(r, c as u16, text)?;
                }
                Value::Number(n) => {
                    sheet.write_number(r, c as u16, *n)?;
                }
            }
        }
        r += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save workbook {path}"))?;
    Ok(())
}
