// src/export/normalize.rs

use serde::Deserialize;

use crate::error::{ExtractError, Result};
use crate::extract::{DataRow, HeaderRow, TabularRecordSet};

/// What to do with a data row that has more cells than there are headers.
/// Short rows are always padded with missing cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedPolicy {
    /// Fail the table with [`ExtractError::RaggedRow`].
    #[default]
    Reject,
    /// Drop the cells beyond the last header.
    Truncate,
}

impl std::str::FromStr for RaggedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "truncate" => Ok(Self::Truncate),
            other => Err(format!("unknown ragged policy {:?}", other)),
        }
    }
}

/// Pair one table's headers with its rows into a rectangular record set.
pub fn normalize(
    index: usize,
    headers: HeaderRow,
    rows: Vec<DataRow>,
    policy: RaggedPolicy,
) -> Result<TabularRecordSet> {
    let columns = headers.len();
    let mut out = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.len() > columns && policy == RaggedPolicy::Reject {
            return Err(ExtractError::RaggedRow {
                table: index,
                row: row_idx,
                cells: row.len(),
                columns,
            });
        }
        let mut cells: Vec<Option<String>> = row.into_iter().take(columns).map(Some).collect();
        cells.resize(columns, None);
        out.push(cells);
    }

    Ok(TabularRecordSet {
        index,
        headers,
        rows: out,
    })
}
