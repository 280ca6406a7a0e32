//! Remote rate source over HTTP
//!
//! Fetches the published `rates.json` with a cache-defeating query parameter
//! so an intermediate cache never serves yesterday's table.

use super::source::RateSource;
use crate::error::{CursError, Result};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// `rates.json` served over HTTP(S)
pub struct HttpRateSource {
    client: Client,
    url: String,
}

impl HttpRateSource {
    /// Create a source with the default timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a source with an explicit request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                CursError::RatesUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// URL with the `v=<millis>` cache buster appended
    pub fn cache_busted_url(&self, now_millis: i64) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}v={}", self.url, separator, now_millis)
    }
}

impl RateSource for HttpRateSource {
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send {
        async move {
            let url = self.cache_busted_url(chrono::Utc::now().timestamp_millis());
            log::debug!("Fetching rates from {}", url);

            let response = self
                .client
                .get(&url)
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache")
                .send()
                .await
                .map_err(|e| CursError::RatesUnavailable(format!("HTTP request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(CursError::RatesUnavailable(format!(
                    "Rate server returned error: {}",
                    response.status()
                )));
            }

            response
                .text()
                .await
                .map_err(|e| CursError::RatesUnavailable(format!("Failed to read response: {}", e)))
        }
    }

    fn name(&self) -> String {
        self.url.clone()
    }
}
