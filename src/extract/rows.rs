// src/extract/rows.rs

use tracing::debug;

use super::document::{row_cells, Node};
use super::types::DataRow;
use crate::error::Result;

/// Data rows of every table: all `tr` elements after the first.
///
/// Rows whose cells all fail extraction still yield an empty `DataRow`. The
/// result always has one entry per table, whatever the header extractor
/// decided.
pub fn extract_rows(tables: &[Node<'_>]) -> Result<Vec<Vec<DataRow>>> {
    tables
        .iter()
        .enumerate()
        .map(|(idx, table)| {
            let rows: Vec<DataRow> = table
                .find_all("tr")?
                .iter()
                .skip(1)
                .map(row_cells)
                .collect();
            debug!(table = idx, rows = rows.len(), "extracted data rows");
            Ok(rows)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::document::Document;
    use crate::extract::headers::extract_headers;

    #[test]
    fn test_rows_after_first_in_order() {
        let doc = Document::parse(
            "<table><tr><th>A</th><th>B</th></tr>\
             <tr><td>1</td><td>2</td></tr>\
             <tr><td>3</td><td>4</td></tr></table>",
        );
        let data = extract_rows(&doc.tables().unwrap()).unwrap();
        assert_eq!(data, vec![vec![vec!["1", "2"], vec!["3", "4"]]]);
    }

    #[test]
    fn test_empty_rows_are_kept() {
        let doc = Document::parse(
            "<table><tr><th>A</th></tr><tr><!-- nothing --></tr><tr><td>1</td></tr></table>",
        );
        let data = extract_rows(&doc.tables().unwrap()).unwrap();
        assert_eq!(data[0], vec![Vec::<String>::new(), vec!["1".to_string()]]);
    }

    #[test]
    fn test_ragged_rows_are_preserved() {
        let doc = Document::parse(
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td></tr><tr><td>1</td><td>2</td><td>3</td></tr></table>",
        );
        let data = extract_rows(&doc.tables().unwrap()).unwrap();
        assert_eq!(data[0][0].len(), 1);
        assert_eq!(data[0][1].len(), 3);
    }

    #[test]
    fn test_length_matches_tables_even_when_headers_absent() {
        let doc = Document::parse(
            "<table><tr><th>A</th></tr><tr><td>1</td></tr></table><table></table>",
        );
        let tables = doc.tables().unwrap();
        assert_eq!(extract_headers(&tables).unwrap(), None);
        let data = extract_rows(&tables).unwrap();
        assert_eq!(data.len(), tables.len());
        assert!(data[1].is_empty());
    }
}
