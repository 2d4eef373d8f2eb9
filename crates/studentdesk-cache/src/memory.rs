//! In-process cache store backed by `DashMap`.
//!
//! Entries expire lazily: an expired entry is dropped the next time it is
//! read, and every [`PURGE_INTERVAL`] writes sweep out whatever else has
//! expired. There is no size bound beyond that.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use crate::store::{CacheError, CacheStore};

/// Number of writes between sweeps of expired entries.
pub const PURGE_INTERVAL: usize = 64;

#[derive(Debug)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Lock-free in-process cache.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<DashMap<String, CacheEntry>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.store.retain(|_, entry| !entry.is_expired(now));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.store
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();

        let Some(entry) = self.store.get(key) else {
            return Ok(None);
        };

        if entry.is_expired(now) {
            drop(entry);
            self.store
                .remove_if(key, |_, entry| entry.is_expired(now));
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % PURGE_INTERVAL == 0 {
            self.purge_expired();
        }

        self.store.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), TTL).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), TTL).await.unwrap();

        cache.delete("k").await.unwrap();
        cache.delete("k").await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), TTL).await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_expiry() {
        let cache = MemoryCache::new();
        cache.set("k", "old".to_string(), TTL).await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(10)).await;
        cache.set("k", "new".to_string(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_sweep_expired_entries() {
        let cache = MemoryCache::new();
        for i in 0..10 {
            cache.set(&format!("stale_{i}"), "v".to_string(), TTL).await.unwrap();
        }

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        // Never read again, so only the periodic sweep can drop them.
        for _ in 10..PURGE_INTERVAL {
            cache.set("fresh", "v".to_string(), TTL).await.unwrap();
        }

        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_keeps_live_entries() {
        let cache = MemoryCache::new();
        cache.set("old", "v".to_string(), Duration::from_secs(5)).await.unwrap();
        cache.set("new", "v".to_string(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(6)).await;
        cache.purge_expired();

        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("new"));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = MemoryCache::new();
        let other = cache.clone();

        cache.set("k", "v".to_string(), TTL).await.unwrap();
        assert!(other.contains_key("k"));
    }
}
