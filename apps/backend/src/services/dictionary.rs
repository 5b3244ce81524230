//! Client for the free dictionary API used to validate word-chain words.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use wordplay_core::LookupOutcome;

use crate::config::DictionaryConfig;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("invalid dictionary base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Looks words up at `{base}/api/v2/entries/en/{word}`.
///
/// 2xx means the word exists and 404 means it does not. Anything else is
/// retried and finally reported as [`LookupOutcome::Unavailable`].
#[derive(Clone)]
pub struct DictionaryClient {
    client: Client,
    base_url: Url,
    retries: u32,
    retry_delay: Duration,
}

impl DictionaryClient {
    pub fn new(config: &DictionaryConfig) -> Result<Self, DictionaryError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DictionaryError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            retries: config.retries,
            retry_delay: config.retry_delay,
        })
    }

    /// Look a word up, retrying transient failures.
    pub async fn lookup(&self, word: &str) -> LookupOutcome {
        let mut attempt = 0;
        loop {
            match self.fetch(word).await {
                Ok(outcome) => return outcome,
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(word, attempt, "Dictionary lookup failed, retrying: {}", e);
                    tokio::time::sleep(self.retry_delay * attempt).await;
                }
                Err(e) => {
                    tracing::error!(word, "Dictionary unavailable: {}", e);
                    return LookupOutcome::Unavailable;
                }
            }
        }
    }

    async fn fetch(&self, word: &str) -> Result<LookupOutcome, DictionaryError> {
        let url = self.entry_url(word)?;
        let resp = self.client.get(url).send().await?;

        match resp.status() {
            status if status.is_success() => Ok(LookupOutcome::Valid),
            StatusCode::NOT_FOUND => Ok(LookupOutcome::NotAWord),
            status => Err(DictionaryError::Status(status)),
        }
    }

    fn entry_url(&self, word: &str) -> Result<Url, DictionaryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DictionaryError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", word]);
        Ok(url)
    }
}
