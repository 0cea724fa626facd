//! In-memory cache implementation using DashMap

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::CacheProvider;
use super::CachedValue;

/// One key's value and generation, updated under the same shard lock.
#[derive(Debug, Default)]
struct Slot {
    value: Option<CachedValue>,
    generation: u64,
}

/// An in-memory cache backed by a concurrent hash map.
///
/// This is the default cache implementation. It's fast and thread-safe,
/// but data is lost when the process exits.
///
/// # Example
///
/// ```
/// use funcionarios_lib::cache::InMemoryCache;
///
/// let cache = InMemoryCache::new();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    store: DashMap<String, Slot>,
}

impl InMemoryCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of cached values (including stale ones).
    pub fn len(&self) -> usize {
        self.store.iter().filter(|slot| slot.value.is_some()).count()
    }

    /// Returns `true` if no value is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CachedValue> {
        self.store.get(key).and_then(|slot| slot.value.clone())
    }

    async fn set(&self, key: &str, value: CachedValue) {
        self.store.entry(key.to_string()).or_default().value = Some(value);
    }

    async fn set_if_current(&self, key: &str, value: CachedValue, generation: u64) -> bool {
        let mut slot = self.store.entry(key.to_string()).or_default();
        if slot.generation != generation {
            return false;
        }
        slot.value = Some(value);
        true
    }

    async fn generation(&self, key: &str) -> u64 {
        self.store.get(key).map(|slot| slot.generation).unwrap_or(0)
    }

    async fn invalidate(&self, key: &str) {
        let mut slot = self.store.entry(key.to_string()).or_default();
        slot.generation += 1;
        if let Some(value) = slot.value.as_mut() {
            value.expires_at = Utc::now();
        }
    }

    async fn remove(&self, key: &str) {
        if let Some(mut slot) = self.store.get_mut(key) {
            slot.value = None;
            slot.generation += 1;
        }
    }

    async fn clear(&self) {
        for mut slot in self.store.iter_mut() {
            slot.value = None;
            slot.generation += 1;
        }
    }

    async fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, slot| {
            if slot.value.as_ref().is_some_and(CachedValue::is_expired) {
                slot.value = None;
                removed += 1;
            }
            // Slots keep their generation once advanced.
            slot.value.is_some() || slot.generation > 0
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn value() -> CachedValue {
        CachedValue::with_ttl(b"[]".to_vec(), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_invalidate_keeps_stale_value() {
        let cache = InMemoryCache::new();
        cache.set("sanciones:false", value()).await;
        assert!(!cache.get("sanciones:false").await.unwrap().is_expired());

        cache.invalidate("sanciones:false").await;
        let stale = cache.get("sanciones:false").await.unwrap();
        assert!(stale.is_expired());
        assert_eq!(stale.data, b"[]");

        assert_eq!(cache.gc().await, 1);
        assert!(cache.is_empty());
        assert!(cache.get("sanciones:false").await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_missing_key_advances_generation() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.generation("nada").await, 0);
        cache.invalidate("nada").await;
        assert!(cache.get("nada").await.is_none());
        assert_eq!(cache.generation("nada").await, 1);
    }

    #[tokio::test]
    async fn test_set_if_current_rejects_after_invalidate() {
        let cache = InMemoryCache::new();
        let generation = cache.generation("sanciones:false").await;

        cache.invalidate("sanciones:false").await;
        assert!(!cache.set_if_current("sanciones:false", value(), generation).await);
        assert!(cache.get("sanciones:false").await.is_none());

        let generation = cache.generation("sanciones:false").await;
        assert!(cache.set_if_current("sanciones:false", value(), generation).await);
        assert!(cache.get("sanciones:false").await.is_some());
    }

    #[tokio::test]
    async fn test_gc_keeps_generation() {
        let cache = InMemoryCache::new();
        cache.set("documentos:true", value()).await;
        cache.invalidate("documentos:true").await;
        let generation = cache.generation("documentos:true").await;

        cache.gc().await;
        assert_eq!(cache.generation("documentos:true").await, generation);
    }

    #[tokio::test]
    async fn test_clear_advances_generation() {
        let cache = InMemoryCache::new();
        cache.set("ausencias:false", value()).await;
        cache.clear().await;
        assert!(cache.is_empty());
        assert_eq!(cache.generation("ausencias:false").await, 1);
    }
}
