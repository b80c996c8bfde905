// src/bin/convert_html.rs
//
// Convert a saved section (raw HTML, or the API's JSON envelope when the
// file ends in `.json`) to CSV files without touching the network.

use anyhow::{Context, Result};
use elabscraper::{config::Config, pipeline, Outcome};
use std::{env, fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cfg = Config::load()?;
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .init();

    let input: PathBuf = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: convert_html <section.html|section.json>")?;
    let text = fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    let naming = cfg.naming();
    let outcome = if input.extension().and_then(|s| s.to_str()) == Some("json") {
        let envelope: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("decoding JSON envelope {}", input.display()))?;
        pipeline::run_envelope(&envelope, &naming, cfg.ragged_policy)?
    } else {
        pipeline::run(&text, &naming, cfg.ragged_policy)?
    };

    match outcome {
        Outcome::HeadersAbsent => println!("No tables with headers found; nothing to export."),
        Outcome::Exported(report) => {
            for path in &report.written {
                println!("{}", path.display());
            }
            info!(
                written = report.written.len(),
                skipped = report.skipped.len(),
                "converted {}",
                input.display()
            );
        }
    }
    Ok(())
}
