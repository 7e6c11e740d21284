//! Rating pipeline configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Rating pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RatingConfig {
    /// Per-provider timeout in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    /// Rated-response cache TTL in seconds
    #[serde(default = "default_quote_cache_ttl")]
    pub quote_cache_ttl_secs: u64,

    /// Exchange-rate cache TTL in seconds
    #[serde(default = "default_fx_cache_ttl")]
    pub fx_cache_ttl_secs: u64,

    /// Cubing factor in kilograms per cubic metre
    #[serde(default = "default_cubic_factor")]
    pub cubic_factor_kg_per_m3: f64,

    /// Minimum r-squared for a regression model to be offered
    #[serde(default = "default_confidence_floor")]
    pub regression_confidence_floor: f64,
}

impl RatingConfig {
    /// Get the provider timeout as Duration
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Validate rating configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider_timeout_ms < 100 || self.provider_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        if self.cubic_factor_kg_per_m3 <= 0.0 {
            return Err(ValidationError::InvalidCubicFactor);
        }
        if !(0.0..=1.0).contains(&self.regression_confidence_floor) {
            return Err(ValidationError::InvalidConfidenceFloor);
        }
        Ok(())
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: default_provider_timeout_ms(),
            quote_cache_ttl_secs: default_quote_cache_ttl(),
            fx_cache_ttl_secs: default_fx_cache_ttl(),
            cubic_factor_kg_per_m3: default_cubic_factor(),
            regression_confidence_floor: default_confidence_floor(),
        }
    }
}

fn default_provider_timeout_ms() -> u64 {
    8_000
}

fn default_quote_cache_ttl() -> u64 {
    300
}

fn default_fx_cache_ttl() -> u64 {
    3_600
}

fn default_cubic_factor() -> f64 {
    250.0
}

fn default_confidence_floor() -> f64 {
    0.7
}
