//! Cache configuration.
//!
//! # Environment Variables
//!
//! - `REDIS_URL`: Redis connection URL. When unset, the in-process store is used.
//! - `STUDENT_PROFILE_TTL_SECONDS`: lifetime of cached student profiles (default: `3600`)

use std::env;
use std::time::Duration;

/// Default lifetime of a cached student profile.
pub const DEFAULT_PROFILE_TTL_SECONDS: u64 = 3600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Redis connection URL, if a shared cache should be used.
    pub redis_url: Option<String>,

    /// Time-to-live for cached student profiles in seconds.
    pub profile_ttl_seconds: u64,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            profile_ttl_seconds: env::var("STUDENT_PROFILE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_PROFILE_TTL_SECONDS),
        }
    }

    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            profile_ttl_seconds: DEFAULT_PROFILE_TTL_SECONDS,
        }
    }
}
