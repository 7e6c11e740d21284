//! Quote Cache Port - generic key-value cache with TTL.
//!
//! Backs response-level quote caching and exchange-rate caching. Values
//! are serialized JSON strings; callers own (de)serialization so the port
//! stays payload-agnostic.

use async_trait::async_trait;
use thiserror::Error;

/// Port for TTL'd key-value caching.
#[async_trait]
pub trait QuoteCache: Send + Sync {
    /// Fetches a cached value, `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores a value with a time-to-live in seconds.
    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    /// Removes a key.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache failures. The aggregator treats these as degradations, not errors.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache serialization failed: {0}")]
    Serialization(String),
}
