//! Rate Provider Port - interface for quote sources.
//!
//! Each pricing source (rate sheets, the regression model, live carrier
//! integrations) implements this port. The aggregator fans a shipment out
//! to every configured provider and merges whatever comes back; a provider
//! that fails contributes nothing rather than failing the request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Money;
use crate::domain::pricing::RateSource;
use crate::domain::shipment::Shipment;

/// Port for pricing sources.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rates a shipment. Returns zero or more carrier rates in the
    /// carrier's native currency. An empty vec means "nothing offered for
    /// this lane" and is not an error.
    async fn rate(&self, shipment: &Shipment) -> Result<Vec<CarrierRate>, RateError>;

    /// Provider identity for logging and failure reporting.
    fn provider_info(&self) -> ProviderInfo;
}

/// A raw rate from a provider, before the landed-cost pipeline runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierRate {
    pub carrier_code: String,
    pub carrier_name: String,
    pub service_code: String,
    pub service_name: String,
    /// Base freight in the carrier's currency.
    pub freight: Money,
    pub transit_days: Option<u32>,
    pub source: RateSource,
}

/// Provider identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub source: RateSource,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, source: RateSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Errors a provider can return.
#[derive(Debug, Clone, Error)]
pub enum RateError {
    #[error("Provider timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("Provider rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Provider error: {message}")]
    Internal { message: String },
}

impl RateError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        RateError::Unavailable { message: message.into() }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        RateError::InvalidRequest { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RateError::Internal { message: message.into() }
    }

    /// True for transient failures worth retrying on a later request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RateError::Timeout { .. }
                | RateError::Unavailable { .. }
                | RateError::RateLimited { .. }
        )
    }
}
