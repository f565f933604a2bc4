//! Canonical table model shared by both reshape paths and all sinks.

use serde::Serialize;

use crate::error::{Result, ScrapeError};

/// Filtered extraction result. Rows are ragged (one cell per discovered
/// source column); uniform width is only enforced by the reshape step.
#[derive(Debug, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Stable output-column identity. The ordinal alone guarantees uniqueness:
/// transposing a statement table can leave several columns with the same
/// metric label, so lookups must never rely on the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnId {
    pub ordinal: usize,
    pub label: String,
}

/// A single cell: raw text as extracted, a number after coercion, or a
/// missing marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Text(String),
    Number(f64),
}

impl Value {
    pub fn from_cell(cell: Option<String>) -> Self {
        match cell {
            Some(text) => Self::Text(text),
            None => Self::Missing,
        }
    }
}

/// Rectangular table with identified columns. Every row has exactly one
/// value per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<ColumnId>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Neutral labelled-column view over a raw extraction result: columns
    /// are named by 0-based position, ragged rows are padded with missing
    /// markers.
    pub fn from_raw(raw: RawTable) -> Self {
        let width = raw.width();
        let columns = assign_identities((0..width).map(|i| i.to_string()));
        let rows = raw
            .rows
            .into_iter()
            .map(|cells| {
                let mut row: Vec<Value> = cells.into_iter().map(Value::from_cell).collect();
                row.resize(width, Value::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Validate and apply a 1-based single-record slice. The bound is
    /// checked before anything is touched.
    pub fn slice_record(&mut self, record: usize) -> Result<()> {
        if record == 0 || record > self.rows.len() {
            return Err(ScrapeError::RecordIndexOutOfRange {
                requested: record,
                available: self.rows.len(),
            });
        }
        self.rows = vec![self.rows.swap_remove(record - 1)];
        Ok(())
    }
}

/// Tag each label with its position, in order. Duplicate labels yield
/// distinct identities.
pub fn assign_identities<I, S>(labels: I) -> Vec<ColumnId>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels
        .into_iter()
        .enumerate()
        .map(|(ordinal, label)| ColumnId {
            ordinal,
            label: label.into(),
        })
        .collect()
}
