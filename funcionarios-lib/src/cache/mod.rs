//! Collection cache
//!
//! Provides a `CacheProvider` trait and an in-memory implementation for
//! caching serialized collections with a TTL. Expired entries are still
//! returned by `get()`: the client serves them as last-known-good data when a
//! refetch fails.

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// A cached value with metadata about when it was cached and when it expires.
#[derive(Debug, Clone)]
pub struct CachedValue {
    /// The cached data, serialized as bytes.
    pub data: Vec<u8>,
    /// When this value was cached.
    pub created_at: DateTime<Utc>,
    /// When this value stops being fresh.
    pub expires_at: DateTime<Utc>,
}

impl CachedValue {
    /// Creates a new cached value.
    pub fn new(data: Vec<u8>, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            created_at,
            expires_at,
        }
    }

    /// Creates a new cached value with a TTL from now.
    pub fn with_ttl(data: Vec<u8>, ttl: std::time::Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            data,
            created_at: now,
            expires_at,
        }
    }

    /// Returns `true` if this value is stale and should be refetched.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Trait for cache providers.
///
/// Implementations store and retrieve cached values by string keys.
/// Unlike a plain TTL cache, expiry only marks a value stale:
/// - `get()` returns stale values too; callers check [`CachedValue::is_expired`]
/// - `invalidate()` marks a value stale without dropping it
/// - `gc()` is the only thing that drops stale values
///
/// Every key also carries a generation that `invalidate()`, `remove()` and
/// `clear()` advance. A fetch reads it before going to the network and
/// stores its result with `set_if_current()`, so a response that raced a
/// write never lands as fresh data.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Retrieves a cached value by key, fresh or stale.
    async fn get(&self, key: &str) -> Option<CachedValue>;

    /// Stores a value in the cache.
    async fn set(&self, key: &str, value: CachedValue);

    /// Stores a value unless the key's generation moved past `generation`.
    ///
    /// Returns `false` if the value was discarded.
    async fn set_if_current(&self, key: &str, value: CachedValue, generation: u64) -> bool;

    /// Current generation of a key, 0 if it was never invalidated.
    async fn generation(&self, key: &str) -> u64;

    /// Marks a value stale and advances the key's generation.
    async fn invalidate(&self, key: &str);

    /// Removes a value from the cache.
    async fn remove(&self, key: &str);

    /// Clears all values from the cache.
    async fn clear(&self);

    /// Removes all stale entries from the cache.
    ///
    /// Returns the number of entries removed.
    async fn gc(&self) -> usize;
}
