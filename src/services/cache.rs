//! Bounded TTL cache of resource lookups

use std::time::Duration;

use moka::sync::Cache;

use crate::{
    config::CacheConfig,
    error::AppResult,
    models::resource::Resource,
    repository::ReservationStore,
};

/// Resources keyed by id, evicted after the configured TTL or when full.
/// Misses are not cached.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Cache<i32, Resource>,
}

impl ResourceCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(Duration::from_secs(config.ttl_seconds))
                .build(),
        }
    }

    /// Cached resource, loading it from `store` on a miss
    pub async fn get_or_load(&self, store: &dyn ReservationStore, id: i32) -> AppResult<Option<Resource>> {
        if let Some(resource) = self.inner.get(&id) {
            return Ok(Some(resource));
        }
        let loaded = store.find_resource(id).await?;
        if let Some(ref resource) = loaded {
            self.inner.insert(id, resource.clone());
        }
        Ok(loaded)
    }

    /// Drop a cached resource. Whatever edits resources calls this after
    /// each write; until then readers see the cached copy for at most the TTL.
    pub fn invalidate(&self, id: i32) {
        self.inner.invalidate(&id);
    }
}
