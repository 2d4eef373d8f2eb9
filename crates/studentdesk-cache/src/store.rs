//! The cache store abstraction.

use async_trait::async_trait;
use std::time::Duration;

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] ::redis::RedisError),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// A key-value store with per-entry expiry.
///
/// Each operation is atomic for a single key. Sequences of operations are
/// not: callers that read, compute and write back must tolerate concurrent
/// writers.
#[async_trait]
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any existing entry and
    /// restarting its expiry clock.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
