//! Server configuration from environment variables

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Dictionary API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Extra attempts after a transport error or unexpected status.
    pub retries: u32,
    /// Base delay between attempts, multiplied by the attempt number.
    pub retry_delay: Duration,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DICTIONARY_URL.to_string(),
            timeout: Duration::from_secs(5),
            retries: 1,
            retry_delay: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// PostgreSQL URL. Without one, scores live in memory.
    pub database_url: Option<String>,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DictionaryConfig::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&lookup, "PORT")?.unwrap_or(3000),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            dictionary: DictionaryConfig {
                base_url: lookup("DICTIONARY_API_URL").unwrap_or(defaults.base_url),
                timeout: parse(&lookup, "DICTIONARY_TIMEOUT_SECS")?
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
                retries: parse(&lookup, "DICTIONARY_RETRIES")?.unwrap_or(defaults.retries),
                retry_delay: defaults.retry_delay,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
