//! Exchange Rate Port - currency conversion rates.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::Currency;

/// Port for fetching conversion rates between supported currencies.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    /// The multiplier converting one unit of `from` into `to`.
    /// Must return exactly 1.0 when `from == to`.
    async fn rate(&self, from: Currency, to: Currency) -> Result<f64, ExchangeRateError>;
}

/// Exchange-rate lookup failures.
#[derive(Debug, Clone, Error)]
pub enum ExchangeRateError {
    #[error("No rate published for {from} -> {to}")]
    UnsupportedPair { from: Currency, to: Currency },

    #[error("Rate source unavailable: {0}")]
    Unavailable(String),

    #[error("Rate source rejected credentials")]
    AuthenticationFailed,

    #[error("Malformed rate response: {0}")]
    MalformedResponse(String),
}

impl ExchangeRateError {
    /// True for transient failures.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExchangeRateError::Unavailable(_))
    }
}
