//! Exchange-rate HTTP source.
//!
//! Talks to an openexchangerates-style API: `GET /latest.json?app_id=...
//! &base=USD` returning `{"base": "USD", "rates": {"CAD": 1.35, ...}}`.
//! Transient failures are retried with a short linear backoff.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenExchangeConfig::new(api_key)
//!     .with_base_url("https://openexchangerates.org/api");
//!
//! let source = OpenExchangeSource::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Currency;
use crate::ports::{ExchangeRateError, ExchangeRateSource};

/// Configuration for the exchange-rate API client.
#[derive(Debug, Clone)]
pub struct OpenExchangeConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenExchangeConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://openexchangerates.org/api".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// HTTP exchange-rate source.
pub struct OpenExchangeSource {
    client: Client,
    config: OpenExchangeConfig,
}

impl OpenExchangeSource {
    /// Creates a source from configuration.
    pub fn new(config: OpenExchangeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client, config }
    }

    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<f64, ExchangeRateError> {
        let url = format!("{}/latest.json", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.config.api_key.expose_secret().as_str()),
                ("base", from.code()),
            ])
            .send()
            .await
            .map_err(|e| ExchangeRateError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ExchangeRateError::AuthenticationFailed);
            }
            status if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS => {
                return Err(ExchangeRateError::Unavailable(format!(
                    "rate API returned {}",
                    status
                )));
            }
            status => {
                return Err(ExchangeRateError::MalformedResponse(format!(
                    "unexpected status {}",
                    status
                )));
            }
        }

        let body: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| ExchangeRateError::MalformedResponse(e.to_string()))?;

        body.rates
            .get(to.code())
            .copied()
            .filter(|rate| *rate > 0.0)
            .ok_or(ExchangeRateError::UnsupportedPair { from, to })
    }
}

#[async_trait]
impl ExchangeRateSource for OpenExchangeSource {
    async fn rate(&self, from: Currency, to: Currency) -> Result<f64, ExchangeRateError> {
        if from == to {
            return Ok(1.0);
        }

        let mut attempt = 0;
        loop {
            match self.fetch_rate(from, to).await {
                Ok(rate) => return Ok(rate),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        error = %err,
                        "rate API failed, retrying"
                    );
                    sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
