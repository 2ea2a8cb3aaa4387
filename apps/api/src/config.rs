use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE_URL;

/// Application configuration loaded from environment variables.
///
/// The provider API key is not configuration: it arrives with each form.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the persisted resume collection.
    pub store_dir: PathBuf,
    pub anthropic_api_url: String,
    /// Upper bound on one generation round-trip. `None` waits indefinitely.
    pub generation_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            store_dir: std::env::var("RESUME_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            generation_timeout: optional_env("GENERATION_TIMEOUT_SECS")
                .map(|secs| {
                    secs.parse::<u64>()
                        .map(Duration::from_secs)
                        .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
