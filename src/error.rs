// src/error.rs

use std::io;

/// Errors raised by the extraction and export core.
///
/// A missing header row is deliberately not represented here; see
/// [`crate::pipeline::Outcome::HeadersAbsent`].
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// The payload could not be turned into a queryable document.
    #[error("parse error: {0}")]
    Parse(String),

    /// A node carried no cell text. Absorbed by the extractors.
    #[error("no cell text in {0}")]
    Extraction(String),

    /// A data row has more cells than the table has columns.
    #[error("table {table}: row {row} has {cells} cells but only {columns} columns")]
    RaggedRow {
        table: usize,
        row: usize,
        cells: usize,
        columns: usize,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
