//! Read-through cache of student profile snapshots.
//!
//! Entries are stored under `student_profile_<id>` as the JSON encoding of
//! [`Student`], so a hit reproduces the record exactly as it was when
//! cached. A failing store never fails a request: every error is logged
//! and treated as a miss.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use studentdesk_cache::{CacheStore, keys};
use tracing::{info, warn};
use uuid::Uuid;

use super::model::Student;

/// Where a retrieved profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct ProfileCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl ProfileCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Returns the cached snapshot for `id`, if any.
    pub async fn get(&self, id: Uuid) -> Option<Student> {
        let key = keys::student_profile(id);

        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(cache.key = %key, "Profile cache miss");
                return None;
            }
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Profile cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<Student>(&raw) {
            Ok(student) => {
                info!(cache.key = %key, "Profile cache hit");
                Some(student)
            }
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Discarding undecodable profile cache entry");
                self.invalidate(id).await;
                None
            }
        }
    }

    /// Stores a snapshot of `student` for the configured TTL.
    pub async fn put(&self, student: &Student) {
        let key = keys::student_profile(student.id);

        let payload = match serde_json::to_string(student) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Failed to encode profile for cache");
                return;
            }
        };

        if let Err(e) = self.store.set(&key, payload, self.ttl).await {
            warn!(cache.key = %key, error = %e, "Profile cache write failed");
        } else {
            info!(cache.key = %key, ttl_secs = self.ttl.as_secs(), "Profile cached");
        }
    }

    /// Removes the snapshot for `id`. Removing an absent entry is a no-op.
    pub async fn invalidate(&self, id: Uuid) {
        let key = keys::student_profile(id);

        match self.store.delete(&key).await {
            Ok(()) => info!(cache.key = %key, "Profile cache invalidated"),
            Err(e) => warn!(cache.key = %key, error = %e, "Profile cache invalidation failed"),
        }
    }
}
