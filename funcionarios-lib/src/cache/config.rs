//! Cache configuration

use std::time::Duration;

/// Configuration for cache TTL (time-to-live) settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use funcionarios_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_collection_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched collection is served without refetching.
    ///
    /// Default: 5 minutes
    pub collection_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            collection_ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collection TTL.
    pub fn with_collection_ttl(mut self, ttl: Duration) -> Self {
        self.collection_ttl = ttl;
        self
    }

    /// Every read refetches. The last fetched collection is still kept as a
    /// fallback for failed refetches.
    pub fn no_cache() -> Self {
        Self {
            collection_ttl: Duration::ZERO,
        }
    }
}
