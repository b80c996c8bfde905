// src/config.rs

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

use crate::export::{RaggedPolicy, SequentialNaming};
use crate::fetch::RetryPolicy;

pub const DEFAULT_AUTH_URL: &str = "https://www.elabjournal.com/api/v1/auth/user";

/// Runtime settings. Loaded from an optional YAML file named by
/// `ELAB_CONFIG`, then overridden field by field from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub section_url: Option<String>,
    pub output_dir: PathBuf,
    pub artifact_prefix: String,
    pub ragged_policy: RaggedPolicy,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            username: None,
            password: None,
            section_url: None,
            output_dir: PathBuf::from("Downloads"),
            artifact_prefix: "Data".to_string(),
            ragged_policy: RaggedPolicy::default(),
            max_retries: 3,
            initial_backoff_ms: 500,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var("ELAB_CONFIG") {
            Ok(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&text).with_context(|| format!("parsing config file {}", path))?
            }
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `ELAB_*` / `LOG_LEVEL` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ELAB_AUTH_URL") {
            self.auth_url = v;
        }
        if let Some(v) = lookup("ELAB_USERNAME") {
            self.username = Some(v);
        }
        if let Some(v) = lookup("ELAB_PASSWORD") {
            self.password = Some(v);
        }
        if let Some(v) = lookup("ELAB_SECTION_URL") {
            self.section_url = Some(v);
        }
        if let Some(v) = lookup("ELAB_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("ELAB_ARTIFACT_PREFIX") {
            self.artifact_prefix = v;
        }
        if let Some(v) = lookup("ELAB_RAGGED_POLICY") {
            self.ragged_policy = v.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.log_level = v;
        }
        Ok(())
    }

    pub fn naming(&self) -> SequentialNaming {
        SequentialNaming::new(&self.output_dir, &self.artifact_prefix)
    }

    pub fn retry(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff_ms: self.initial_backoff_ms,
        }
    }
}
