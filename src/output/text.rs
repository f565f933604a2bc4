//! Plain columnar text on stdout.

use super::{render_grid, Grid};
use crate::process::table::{Table, Value};

/// Print the table as whitespace-aligned columns. Labels are left-aligned,
/// values right-aligned; missing cells print as `-`.
pub fn write_stdout(table: &Table, transpose: bool) {
    print!("{}", format_grid(&render_grid(table, transpose)));
}

fn format_grid(grid: &Grid) -> String {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(grid.rows.len() + 1);
    if let Some(header) = &grid.header {
        cells.push(header.clone());
    }
    cells.extend(grid.rows.iter().map(|row| row.iter().map(display).collect()));

    let width = cells.iter().map(Vec::len).max().unwrap_or(0);
    let mut col_widths = vec![0usize; width];
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &cells {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            if i == 0 {
                line.push_str(&format!("{cell:<w$}", w = col_widths[i]));
            } else {
                line.push_str(&format!("{cell:>w$}", w = col_widths[i]));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn display(value: &Value) -> String {
    match value {
        Value::Missing => "-".to_string(),
        Value::Text(text) => text.clone(),
        Value::Number(n) => n.to_string(),
    }
}
