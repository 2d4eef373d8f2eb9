//! Redis-backed cache store for distributed deployments.

use ::redis::{AsyncCommands, Client, aio::ConnectionManager};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::store::{CacheError, CacheStore};

/// Redis cache client with a managed, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// cannot be reached.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value = conn.get::<_, Option<String>>(key).await?;

        Ok(value)
    }

    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero expiry
        let secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, secs).await?;

        debug!(cache.key = %key, cache.ttl_secs = %secs, "Cache set");

        Ok(())
    }

    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await?;

        debug!(cache.key = %key, "Cache key deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a running Redis instance

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_set_get_delete() {
        let cache = RedisCache::connect("redis://localhost:6379").await.unwrap();

        cache
            .set("test:key", "value".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get("test:key").await.unwrap(),
            Some("value".to_string())
        );

        cache.delete("test:key").await.unwrap();
        assert_eq!(cache.get("test:key").await.unwrap(), None);

        // deleting again is a no-op
        cache.delete("test:key").await.unwrap();
    }
}
