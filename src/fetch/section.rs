// src/fetch/section.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// An experiment section as returned by the API. Only `contents` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub contents: String,
    #[serde(rename = "sectionType", default)]
    pub section_type: Option<String>,
}

impl Section {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).context("decoding section envelope")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
        }
    }
}

/// Delay before retry number `attempt` (1-based): doubles each time,
/// saturating instead of overflowing.
fn backoff_ms(initial_ms: u64, attempt: u32) -> u64 {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    initial_ms.saturating_mul(factor)
}

async fn get_section_core(client: &Client, token: &str, url: &Url) -> Result<Section> {
    debug!("Fetching section from {}", url);
    let body = client
        .get(url.clone())
        .header(reqwest::header::AUTHORIZATION, token)
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading body from {}", url))?;
    Section::from_json(&body).with_context(|| format!("section at {}", url))
}

/// Fetch one section, retrying with exponential backoff.
#[instrument(level = "info", skip(client, token))]
pub async fn get_section(
    client: &Client,
    token: &str,
    section_url: &str,
    retry: RetryPolicy,
) -> Result<Section> {
    let url = Url::parse(section_url).with_context(|| format!("parsing section URL {}", section_url))?;
    let mut attempts = 0;
    loop {
        match get_section_core(client, token, &url).await {
            Ok(s) => return Ok(s),
            Err(e) if attempts < retry.max_retries => {
                attempts += 1;
                let backoff = backoff_ms(retry.initial_backoff_ms, attempts);
                warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => {
                error!(%url, error = %e, "Exhausted retries");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_json() {
        let s = Section::from_json(
            r#"{"expJournalID":42,"sectionType":"PARAGRAPH","contents":"<table></table>"}"#,
        )
        .unwrap();
        assert_eq!(s.contents, "<table></table>");
        assert_eq!(s.section_type.as_deref(), Some("PARAGRAPH"));
    }

    #[test]
    fn test_section_without_contents_fails() {
        assert!(Section::from_json(r#"{"sectionType":"FILE"}"#).is_err());
        assert!(Section::from_json("not json").is_err());
    }

    #[test]
    fn test_backoff_doubles_and_saturates() {
        assert_eq!(backoff_ms(500, 1), 500);
        assert_eq!(backoff_ms(500, 2), 1000);
        assert_eq!(backoff_ms(500, 4), 4000);
        assert_eq!(backoff_ms(500, 64), u64::MAX);
        assert_eq!(backoff_ms(500, u32::MAX), u64::MAX);
        assert_eq!(backoff_ms(0, 100), 0);
    }

    #[tokio::test]
    async fn test_bad_url_fails_without_retry() {
        let client = Client::new();
        let res = get_section(&client, "tok", "not a url", RetryPolicy::default()).await;
        assert!(res.is_err());
    }
}
