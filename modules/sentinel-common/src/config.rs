use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::SentinelError;

pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/search";

/// Upper bound on a single feed request.
pub const MAX_FEED_TIMEOUT_SECS: u64 = 5;

/// Upper bound on feed entries examined per node.
pub const MAX_FEED_ENTRIES: usize = 15;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub host: String,
    pub port: u16,

    // Feed source
    pub feed_url: String,
    pub feed_timeout: Duration,
    pub feed_max_entries: usize,

    /// Skip every network query; all nodes fall back to canned text.
    pub offline: bool,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// if one exists.
    pub fn from_env() -> Result<Self, SentinelError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys use defaults;
    /// present but malformed values are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SentinelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = parse_or(&lookup, "SENTINEL_FEED_TIMEOUT_SECS", MAX_FEED_TIMEOUT_SECS)?;
        let max_entries: usize = parse_or(&lookup, "SENTINEL_FEED_MAX_ENTRIES", MAX_FEED_ENTRIES)?;

        Ok(Self {
            host: lookup("SENTINEL_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "SENTINEL_PORT", 8091)?,
            feed_url: lookup("SENTINEL_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            feed_timeout: Duration::from_secs(timeout_secs.clamp(1, MAX_FEED_TIMEOUT_SECS)),
            feed_max_entries: max_entries.min(MAX_FEED_ENTRIES),
            offline: parse_or(&lookup, "SENTINEL_OFFLINE", false)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_summary(&self) {
        info!(
            addr = %self.bind_addr(),
            feed_url = %self.feed_url,
            timeout_secs = self.feed_timeout.as_secs(),
            max_entries = self.feed_max_entries,
            offline = self.offline,
            "Config loaded"
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8091,
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timeout: Duration::from_secs(MAX_FEED_TIMEOUT_SECS),
            feed_max_entries: MAX_FEED_ENTRIES,
            offline: false,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, SentinelError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SentinelError::Config(format!("{key} has invalid value {raw:?}"))),
    }
}
