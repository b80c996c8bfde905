use anyhow::{anyhow, Result};
use elabscraper::{
    config::Config,
    fetch::{self, auth::read_line, Credentials, StdinPrompt},
    pipeline::{self, Outcome},
};
use reqwest::Client;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn required(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => read_line(prompt)?.ok_or_else(|| anyhow!("stdin closed while reading input")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config + logging ─────────────────────────────────────────
    let cfg = Config::load()?;
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},elabscraper=info", cfg.log_level)));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) authenticate ─────────────────────────────────────────────
    let client = Client::new();
    let credentials = Credentials {
        username: required(cfg.username.clone(), "Please enter your username: ")?,
        password: required(cfg.password.clone(), "Please enter your password: ")?,
    };
    let token = fetch::authenticate(&client, &cfg.auth_url, credentials, &mut StdinPrompt).await?;

    // ─── 3) fetch the section ────────────────────────────────────────
    let section_url = required(
        cfg.section_url.clone(),
        "Please paste the link you received via email into this terminal: ",
    )?;
    let section = fetch::get_section(&client, &token, &section_url, cfg.retry()).await?;

    // ─── 4) extract + export ─────────────────────────────────────────
    let naming = cfg.naming();
    info!(dir = %naming.dir().display(), "exporting tables");
    match pipeline::run(&section.contents, &naming, cfg.ragged_policy)? {
        Outcome::HeadersAbsent => {
            warn!("no headers found; nothing exported");
            println!("No tables with headers found; nothing to export.");
        }
        Outcome::Exported(report) => {
            for (idx, err) in &report.skipped {
                warn!(table = idx, error = %err, "table not exported");
            }
            println!(
                "Files converted successfully. ({} of {} tables written)",
                report.written.len(),
                report.tables
            );
        }
    }

    info!("all done");
    Ok(())
}
