//! # StudentDesk Cache
//!
//! Key-value cache stores used for read-through caching.
//!
//! This crate provides:
//! - the [`CacheStore`] trait: string keys, TTL-based expiry, get/set/delete
//! - [`RedisCache`]: a Redis-backed store shared across service instances
//! - [`MemoryCache`]: an in-process store for single-node deployments and tests
//! - [`CacheConfig`]: backend selection and TTLs from environment variables
//! - [`keys`]: cache key generation
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use studentdesk_cache::{CacheStore, MemoryCache, keys};
//!
//! let cache = MemoryCache::new();
//! let key = keys::student_profile(student_id);
//! cache.set(&key, payload, Duration::from_secs(3600)).await?;
//! let value: Option<String> = cache.get(&key).await?;
//! ```

pub mod config;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;

pub use config::CacheConfig;
pub use memory::MemoryCache;
pub use self::redis::RedisCache;
pub use store::{CacheError, CacheStore};
