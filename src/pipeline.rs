// src/pipeline.rs

use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

use crate::error::{ExtractError, Result};
use crate::export::{export_all, normalize, ArtifactNaming, RaggedPolicy};
use crate::extract::{extract_headers, extract_rows, Document};

/// How an extraction run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Some table had no rows at all; nothing was written.
    HeadersAbsent,
    Exported(ExportReport),
}

#[derive(Debug, Default)]
pub struct ExportReport {
    /// Number of tables found in the document.
    pub tables: usize,
    /// Artifacts written, in table order.
    pub written: Vec<PathBuf>,
    /// Tables that failed normalization, by table index.
    pub skipped: Vec<(usize, ExtractError)>,
}

impl Outcome {
    /// Number of artifacts written by the run.
    pub fn artifact_count(&self) -> usize {
        match self {
            Outcome::HeadersAbsent => 0,
            Outcome::Exported(report) => report.written.len(),
        }
    }
}

/// Extract every table of `html` and write one CSV artifact per table.
///
/// Header absence is checked once for the whole batch before anything is
/// normalized or written. A table that fails normalization is skipped and
/// reported; the other tables are still written.
#[instrument(level = "info", skip_all, fields(bytes = html.len()))]
pub fn run<N: ArtifactNaming + ?Sized>(
    html: &str,
    naming: &N,
    policy: RaggedPolicy,
) -> Result<Outcome> {
    let document = Document::parse(html);
    let tables = document.tables()?;
    debug!(count = tables.len(), "tables found");

    let headers = extract_headers(&tables)?;
    let data = extract_rows(&tables)?;
    debug!(tables = data.len(), "rows extracted");

    let Some(headers) = headers else {
        warn!("a table has no header row; nothing to export");
        return Ok(Outcome::HeadersAbsent);
    };

    let mut sets = Vec::with_capacity(data.len());
    let mut skipped = Vec::new();
    for (idx, (header, rows)) in headers.into_iter().zip(data).enumerate() {
        match normalize(idx, header, rows, policy) {
            Ok(set) => sets.push(set),
            Err(e) => {
                warn!(table = idx, error = %e, "skipping table");
                skipped.push((idx, e));
            }
        }
    }
    debug!(normalized = sets.len(), skipped = skipped.len(), "normalized");

    let written = export_all(&sets, naming)?;
    info!(
        tables = tables.len(),
        written = written.len(),
        skipped = skipped.len(),
        "export complete"
    );

    Ok(Outcome::Exported(ExportReport {
        tables: tables.len(),
        written,
        skipped,
    }))
}

/// The HTML payload of a section envelope, i.e. its `contents` string.
pub fn envelope_contents(envelope: &Value) -> Result<&str> {
    envelope
        .get("contents")
        .and_then(Value::as_str)
        .ok_or_else(|| ExtractError::Parse("envelope has no string field `contents`".into()))
}

/// [`run`] on the `contents` field of a JSON section envelope.
pub fn run_envelope<N: ArtifactNaming + ?Sized>(
    envelope: &Value,
    naming: &N,
    policy: RaggedPolicy,
) -> Result<Outcome> {
    run(envelope_contents(envelope)?, naming, policy)
}
