// src/extract/headers.rs

use tracing::{debug, warn};

use super::document::{row_cells, Node};
use super::types::HeaderRow;
use crate::error::Result;

/// Header row of every table, taken from its first `tr`.
///
/// Returns `Ok(None)` for the whole batch as soon as one table has no row at
/// all, even if the others are well-formed.
pub fn extract_headers(tables: &[Node<'_>]) -> Result<Option<Vec<HeaderRow>>> {
    let mut all_headers = Vec::with_capacity(tables.len());
    for (idx, table) in tables.iter().enumerate() {
        let Some(first_row) = table.find("tr")? else {
            warn!(table = idx, "table has no rows; no headers for this batch");
            return Ok(None);
        };
        let header = row_cells(&first_row);
        debug!(table = idx, columns = header.len(), "extracted headers");
        all_headers.push(header);
    }
    Ok(Some(all_headers))
}
