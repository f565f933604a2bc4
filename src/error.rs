//! Error taxonomy for the extraction and reshape core.

use thiserror::Error;

/// Errors surfaced by extraction, coercion and record slicing. Each aborts
/// processing for the current symbol/report pair only; the batch loop moves
/// on to the next symbol.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// No rows survived extraction, usually meaning the page markup has
    /// drifted from the selectors.
    #[error("no table rows extracted; page layout may have changed")]
    EmptyExtraction,

    /// A cell could not be converted to a number when the output sink
    /// required numeric fidelity. Never substituted with a default.
    #[error("malformed number in column {column:?}: {value:?}")]
    MalformedNumber {
        /// Label of the column being coerced.
        column: String,
        /// The offending cell text.
        value: String,
    },

    /// A requested 1-based record index exceeds the table's record count.
    #[error("record {requested} out of range: table has {available} record(s)")]
    RecordIndexOutOfRange {
        /// The index the caller asked for.
        requested: usize,
        /// How many records the table actually has.
        available: usize,
    },
}

/// Result type alias using [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;
