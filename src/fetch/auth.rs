// src/fetch/auth.rs

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Source of replacement credentials after a failed login.
pub trait CredentialPrompt {
    /// `Ok(None)` means no further attempts should be made.
    fn prompt(&mut self) -> Result<Option<Credentials>>;
}

/// Never supplies new credentials; a failed login is final.
pub struct NoPrompt;

impl CredentialPrompt for NoPrompt {
    fn prompt(&mut self) -> Result<Option<Credentials>> {
        Ok(None)
    }
}

/// Asks for username and password on the terminal.
pub struct StdinPrompt;

impl CredentialPrompt for StdinPrompt {
    fn prompt(&mut self) -> Result<Option<Credentials>> {
        let Some(username) = read_line("Please enter your username: ")? else {
            return Ok(None);
        };
        let Some(password) = read_line("Please enter your password: ")? else {
            return Ok(None);
        };
        Ok(Some(Credentials { username, password }))
    }
}

/// Print `prompt` and read one trimmed line from stdin; `None` on EOF.
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    let n = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Pull the API token out of a login response body, if it is well-formed.
pub fn parse_token(body: &str) -> Option<String> {
    serde_json::from_str::<TokenResponse>(body)
        .ok()
        .map(|r| r.token)
        .filter(|t| !t.is_empty())
}

/// Exchange credentials for an API token.
///
/// A malformed login response is treated as rejected credentials: `prompt` is
/// asked for new ones and the login is retried for as long as it supplies
/// them. Transport failures are returned immediately.
#[instrument(level = "info", skip(client, credentials, prompt), fields(user = %credentials.username))]
pub async fn authenticate<P: CredentialPrompt>(
    client: &Client,
    auth_url: &str,
    credentials: Credentials,
    prompt: &mut P,
) -> Result<String> {
    let mut credentials = credentials;
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let body = client
            .post(auth_url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("POST {}", auth_url))?
            .text()
            .await
            .with_context(|| format!("reading login response from {}", auth_url))?;

        if let Some(token) = parse_token(&body) {
            info!(attempt, "login successful");
            return Ok(token);
        }

        warn!(attempt, "login failed");
        match prompt.prompt()? {
            Some(next) => credentials = next,
            None => {
                return Err(anyhow!(
                    "login failed for {} after {} attempt(s)",
                    credentials.username,
                    attempt
                ))
            }
        }
    }
}
