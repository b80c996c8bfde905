// src/export/csv.rs

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

use crate::error::Result;
use crate::extract::TabularRecordSet;

/// Write `set` as CSV: an unnamed 0-based index column, then one column per
/// header. Missing cells become empty fields.
pub fn write_csv<W: Write>(set: &TabularRecordSet, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    let header = std::iter::once("").chain(set.headers.iter().map(String::as_str));
    wtr.write_record(header)?;

    for (idx, row) in set.rows.iter().enumerate() {
        let idx = idx.to_string();
        let record = std::iter::once(idx.as_str())
            .chain(row.iter().map(|cell| cell.as_deref().unwrap_or("")));
        wtr.write_record(record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(set: &TabularRecordSet) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(set, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
