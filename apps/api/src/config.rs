use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Directory holding the pre-built client bundle.
    pub static_dir: PathBuf,
    pub video: VideoConfig,
}

/// Credentials for minting access tokens against the hosted video service.
/// The secret is always supplied from the environment.
#[derive(Clone)]
pub struct VideoConfig {
    pub account_sid: String,
    pub api_key: String,
    pub api_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "1337".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "client/dist".to_string())
                .into(),
            video: VideoConfig {
                account_sid: require_env("VIDEO_ACCOUNT_SID")?,
                api_key: require_env("VIDEO_API_KEY")?,
                api_secret: require_env("VIDEO_API_SECRET")?,
                token_ttl_secs: std::env::var("VIDEO_TOKEN_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse::<i64>()
                    .context("VIDEO_TOKEN_TTL_SECS must be a number of seconds")?,
            },
        })
    }
}

pub fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

/// Log level applied to this crate and `tower_http` when `RUST_LOG` holds no directives of its own.
pub fn log_level() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
