//! Rate aggregation: fan out to providers, merge, dedup, rank.
//!
//! Provider failures never fail the request; they are logged and reported
//! in the response's `failures` list. The merged result is cached by a
//! fingerprint of the request; cache trouble degrades to a live
//! computation with a warning.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Currency, DomainError, QuoteRequestId, Timestamp};
use crate::domain::pricing::Quote;
use crate::domain::shipment::Shipment;
use crate::ports::{CarrierRate, MarkupReader, QuoteCache, RateProvider};

use super::LandedCostEngine;

/// One rating request.
#[derive(Debug, Clone, Serialize)]
pub struct RateRequest {
    pub account: AccountId,
    pub shipment: Shipment,
    /// Currency every quote is normalized to.
    pub currency: Currency,
}

/// A provider that contributed nothing, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: String,
    pub reason: String,
}

/// The merged, ranked response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedResponse {
    pub request_id: QuoteRequestId,
    pub rated_at: Timestamp,
    pub currency: Currency,
    /// Quotes sorted ascending by total; one per carrier/service pair.
    pub quotes: Vec<Quote>,
    pub failures: Vec<ProviderFailure>,
    /// True when served from the response cache.
    #[serde(default)]
    pub from_cache: bool,
}

/// Fans a shipment out to every pricing source and merges the results.
pub struct RateAggregator {
    providers: Vec<Arc<dyn RateProvider>>,
    engine: LandedCostEngine,
    markup_reader: Arc<dyn MarkupReader>,
    cache: Arc<dyn QuoteCache>,
    provider_timeout: Duration,
    cache_ttl_secs: u64,
}

impl RateAggregator {
    pub fn new(
        providers: Vec<Arc<dyn RateProvider>>,
        engine: LandedCostEngine,
        markup_reader: Arc<dyn MarkupReader>,
        cache: Arc<dyn QuoteCache>,
        provider_timeout: Duration,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            providers,
            engine,
            markup_reader,
            cache,
            provider_timeout,
            cache_ttl_secs,
        }
    }

    /// Rates a shipment against all configured providers.
    pub async fn rate(&self, request: RateRequest) -> Result<RatedResponse, DomainError> {
        let cache_key = Self::fingerprint(&request);

        if let Some(cached) = self.cached_response(&cache_key).await {
            return Ok(cached);
        }

        let markup = self.markup_reader.markup_for(&request.account).await?;

        let (rates, mut failures) = self.fan_out(&request.shipment).await;

        // Landed cost per rate; a rate that fails to price is dropped,
        // never the whole request.
        let mut priced: Vec<Quote> = Vec::with_capacity(rates.len());
        for rate in rates {
            match self
                .engine
                .price(&request.shipment, &rate, &markup, request.currency)
                .await
            {
                Ok(quote) => priced.push(quote),
                Err(err) => {
                    tracing::warn!(
                        carrier = %rate.carrier_code,
                        service = %rate.service_code,
                        error = %err,
                        "dropping rate that failed landed-cost pricing"
                    );
                    failures.push(ProviderFailure {
                        provider: rate.carrier_code.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let quotes = Self::merge(priced);

        let response = RatedResponse {
            request_id: QuoteRequestId::new(),
            rated_at: Timestamp::now(),
            currency: request.currency,
            quotes,
            failures,
            from_cache: false,
        };

        // A response assembled while a source was down is not worth pinning
        // for the full TTL; let the next request retry the source.
        if response.failures.is_empty() {
            self.store_response(&cache_key, &response).await;
        } else {
            tracing::debug!(
                failures = response.failures.len(),
                "skipping cache write for degraded response"
            );
        }

        Ok(response)
    }

    /// Queries every provider concurrently under a per-provider timeout.
    async fn fan_out(&self, shipment: &Shipment) -> (Vec<CarrierRate>, Vec<ProviderFailure>) {
        let timeout = self.provider_timeout;
        let calls = self.providers.iter().map(|provider| {
            let provider = provider.clone();
            let shipment = shipment.clone();
            async move {
                let info = provider.provider_info();
                let outcome = tokio::time::timeout(timeout, provider.rate(&shipment)).await;
                (info, outcome)
            }
        });

        let mut rates = Vec::new();
        let mut failures = Vec::new();
        for (info, outcome) in futures::future::join_all(calls).await {
            match outcome {
                Ok(Ok(provider_rates)) => {
                    tracing::debug!(
                        provider = %info.name,
                        count = provider_rates.len(),
                        "provider returned rates"
                    );
                    rates.extend(provider_rates);
                }
                Ok(Err(err)) => {
                    tracing::warn!(provider = %info.name, error = %err, "provider failed");
                    failures.push(ProviderFailure {
                        provider: info.name,
                        reason: err.to_string(),
                    });
                }
                Err(_elapsed) => {
                    tracing::warn!(
                        provider = %info.name,
                        timeout_secs = timeout.as_secs(),
                        "provider timed out"
                    );
                    failures.push(ProviderFailure {
                        provider: info.name,
                        reason: format!("timed out after {}s", timeout.as_secs()),
                    });
                }
            }
        }
        (rates, failures)
    }

    /// Keeps the cheapest quote per (carrier, service), sorted by total.
    fn merge(quotes: Vec<Quote>) -> Vec<Quote> {
        let mut best: HashMap<(String, String), Quote> = HashMap::new();
        for quote in quotes {
            let key = quote.dedup_key();
            match best.get(&key) {
                Some(existing) if existing.total.cents() <= quote.total.cents() => {}
                _ => {
                    best.insert(key, quote);
                }
            }
        }
        let mut merged: Vec<Quote> = best.into_values().collect();
        merged.sort_by_key(|q| q.total.cents());
        merged
    }

    /// Stable fingerprint of account + currency + shipment.
    fn fingerprint(request: &RateRequest) -> String {
        // Struct field order is fixed, so the JSON encoding is stable.
        let payload = serde_json::to_string(request).unwrap_or_default();
        let mut hasher = DefaultHasher::new();
        payload.hash(&mut hasher);
        format!("rates:{:016x}", hasher.finish())
    }

    async fn cached_response(&self, key: &str) -> Option<RatedResponse> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<RatedResponse>(&raw) {
                Ok(mut response) => {
                    response.from_cache = true;
                    Some(response)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "discarding undeserializable cached response");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "quote cache read failed, rating live");
                None
            }
        }
    }

    async fn store_response(&self, key: &str, response: &RatedResponse) {
        let raw = match serde_json::to_string(response) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize response for caching");
                return;
            }
        };
        if let Err(err) = self.cache.put(key, &raw, self.cache_ttl_secs).await {
            tracing::warn!(error = %err, "quote cache write failed");
        }
    }
}
