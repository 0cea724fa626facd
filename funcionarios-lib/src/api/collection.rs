//! Collection fetch with stale-while-revalidate caching
//!
//! Every list view reads its whole collection through [`FuncionariosClient::list`].
//! Collections are cached per entity and per `include_deleted` flag:
//!
//! - fresh entry: served as is ([`CacheStatus::Hit`](crate::CacheStatus::Hit))
//! - expired or invalidated entry: refetched, and kept as the fallback if the
//!   refetch fails ([`CacheStatus::Stale`](crate::CacheStatus::Stale))
//! - no entry: fetched ([`CacheStatus::Miss`](crate::CacheStatus::Miss))
//!
//! A fetch that was overtaken by an invalidation returns its data uncached
//! ([`CacheStatus::None`](crate::CacheStatus::None)); the next read refetches.

use std::sync::Arc;

use log::debug;
use log::info;
use log::warn;
use reqwest::Method;
use serde::Deserialize;

use crate::FuncionariosClient;
use crate::Response;
use crate::cache::CachedValue;
use crate::error::Error;
use crate::model::EntityKind;
use crate::model::Record;

/// Query parameter asking the backend to include soft-deleted rows.
const INCLUDE_DELETED_PARAM: &str = "include_deleted";

/// Body of a list endpoint: a bare array or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<R> {
    Bare(Vec<R>),
    Wrapped { data: Vec<R> },
}

impl<R> Envelope<R> {
    fn into_records(self) -> Vec<R> {
        match self {
            Self::Bare(records) | Self::Wrapped { data: records } => records,
        }
    }
}

/// Cache key of one collection.
pub(crate) fn collection_key(kind: EntityKind, include_deleted: bool) -> String {
    format!("{}:{}", kind.path(), include_deleted)
}

fn decode<R: Record>(data: &[u8]) -> Result<Vec<R>, Error> {
    serde_json::from_slice(data).map_err(|e| Error::Cache(e.to_string()))
}

impl FuncionariosClient {
    /// Fetches the full collection of `R`.
    ///
    /// With `include_deleted` the backend also returns soft-deleted rows,
    /// which the table only shows in its "deleted" view.
    ///
    /// # Errors
    ///
    /// Returns the fetch error only when no earlier copy of the collection
    /// is cached; otherwise the stale copy is returned.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let response = client.list::<Sancion>(false).await?;
    /// let state = TableView::new().render(&mut store, Some(response.data().as_slice()));
    /// ```
    pub async fn list<R: Record>(&self, include_deleted: bool) -> Result<Response<Arc<Vec<R>>>, Error> {
        let key = collection_key(R::KIND, include_deleted);
        let cached = self.inner.cache.get(&key).await;

        if let Some(entry) = cached.as_ref().filter(|entry| !entry.is_expired()) {
            match decode::<R>(&entry.data) {
                Ok(records) => {
                    debug!("Cache hit for {} ({} records)", key, records.len());
                    return Ok(Response::cache_hit(
                        Arc::new(records),
                        entry.created_at,
                        entry.expires_at,
                    ));
                }
                Err(e) => warn!("Discarding unreadable cache entry {}: {}", key, e),
            }
        }

        let generation = self.inner.cache.generation(&key).await;

        match self.fetch_collection::<R>(include_deleted).await {
            Ok(records) => {
                let data = serde_json::to_vec(&records)?;
                let entry = CachedValue::with_ttl(data, self.inner.cache_config.collection_ttl);
                let (cached_at, expires_at) = (entry.created_at, entry.expires_at);
                if !self.inner.cache.set_if_current(&key, entry, generation).await {
                    debug!("{} was invalidated during the fetch, not caching it", key);
                    return Ok(Response::new(Arc::new(records)));
                }
                debug!("Fetched {} ({} records)", key, records.len());
                Ok(Response::cache_miss(Arc::new(records), cached_at, expires_at))
            }
            Err(error) => {
                let fallback = cached.and_then(|entry| {
                    decode::<R>(&entry.data)
                        .ok()
                        .map(|records| Response::stale(Arc::new(records), entry.created_at, entry.expires_at))
                });
                match fallback {
                    Some(response) => {
                        warn!("Refetch of {} failed, serving stale copy: {}", key, error);
                        Ok(response)
                    }
                    None => Err(error),
                }
            }
        }
    }

    /// Marks both cached collections of `R` stale.
    pub async fn invalidate<R: Record>(&self) {
        self.invalidate_kind(R::KIND).await;
    }

    /// Marks both cached collections of `kind` stale.
    pub async fn invalidate_kind(&self, kind: EntityKind) {
        info!("Invalidating cached {}", kind);
        for include_deleted in [false, true] {
            self.inner
                .cache
                .invalidate(&collection_key(kind, include_deleted))
                .await;
        }
    }

    /// Fetches a collection directly from the API (no cache).
    async fn fetch_collection<R: Record>(&self, include_deleted: bool) -> Result<Vec<R>, Error> {
        let query: &[(&str, &str)] = if include_deleted {
            &[(INCLUDE_DELETED_PARAM, "1")]
        } else {
            &[]
        };
        let response = self
            .send::<()>(Method::GET, R::KIND.path(), query, None)
            .await?;
        let envelope: Envelope<R> = self.read_json(response).await?;
        Ok(envelope.into_records())
    }
}
