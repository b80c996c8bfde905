// src/extract/types.rs

/// Column names taken from the first row of a table.
pub type HeaderRow = Vec<String>;

/// Cell texts of one row after the first; may be shorter or longer than the header.
pub type DataRow = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRecordSet {
    /// 0-based position of the source table in document order.
    pub index: usize,
    /// Column names, one per output column.
    pub headers: HeaderRow,
    /// Rectangular rows; `None` marks a cell missing from a short source row.
    pub rows: Vec<Vec<Option<String>>>,
}

impl TabularRecordSet {
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
