//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:1010/api/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_FILE: &str = ".creativeprint/session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every endpoint path is appended to, without a trailing `/`.
    pub api_url: String,
    pub timeouts: Timeouts,
    /// JSON file backing the persisted session.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CREATIVEPRINT_API_URL`: default `http://localhost:1010/api/`
    /// - `CREATIVEPRINT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CREATIVEPRINT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CREATIVEPRINT_SESSION_FILE`: default `$HOME/.creativeprint/session.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("CREATIVEPRINT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("CREATIVEPRINT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("CREATIVEPRINT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let session_file = std::env::var("CREATIVEPRINT_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        Self::new(&api_url, timeouts, session_file)
    }

    /// Build config from explicit values, normalising the API URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an absolute http(s) URL.
    pub fn new(api_url: &str, timeouts: Timeouts, session_file: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self { api_url: normalize_api_url(api_url)?, timeouts, session_file })
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|_| ConfigError::InvalidApiUrl(raw.to_owned()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl(raw.to_owned()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn default_session_file() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(DEFAULT_SESSION_FILE),
        Err(_) => PathBuf::from(DEFAULT_SESSION_FILE),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
