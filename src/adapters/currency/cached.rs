//! Caching wrapper over any exchange-rate source.
//!
//! Rates move slowly relative to quote volume; a short TTL keeps the
//! upstream API out of the hot path. Cache trouble falls through to the
//! inner source with a warning.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::Currency;
use crate::ports::{ExchangeRateError, ExchangeRateSource, QuoteCache};

/// Adds TTL'd caching over an inner source.
pub struct CachedExchangeRates {
    inner: Arc<dyn ExchangeRateSource>,
    cache: Arc<dyn QuoteCache>,
    ttl_secs: u64,
}

impl CachedExchangeRates {
    pub fn new(
        inner: Arc<dyn ExchangeRateSource>,
        cache: Arc<dyn QuoteCache>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            inner,
            cache,
            ttl_secs,
        }
    }

    fn cache_key(from: Currency, to: Currency) -> String {
        format!("fx:{}:{}", from, to)
    }
}

#[async_trait]
impl ExchangeRateSource for CachedExchangeRates {
    async fn rate(&self, from: Currency, to: Currency) -> Result<f64, ExchangeRateError> {
        if from == to {
            return Ok(1.0);
        }
        let key = Self::cache_key(from, to);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match raw.parse::<f64>() {
                Ok(rate) => return Ok(rate),
                Err(_) => {
                    tracing::warn!(key = %key, "discarding unparsable cached fx rate");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "fx cache read failed, querying source");
            }
        }

        let rate = self.inner.rate(from, to).await?;

        if let Err(err) = self.cache.put(&key, &rate.to_string(), self.ttl_secs).await {
            tracing::warn!(error = %err, "fx cache write failed");
        }

        Ok(rate)
    }
}
