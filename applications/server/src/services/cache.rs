//! In-memory implementation of the cache gateway
//!
//! Bounded LRU map with an optional per-entry time to live. Stands in for an
//! external key/value store when the service runs as a single process.

use crate::{
    config::CacheSettings,
    error::{Result, ServerError},
};
use async_trait::async_trait;
use lru::LruCache;
use std::{num::NonZeroUsize, time::Duration};
use tokio::{sync::Mutex, time::Instant};
use tuneshelf_core::{CacheGateway, CacheLookup};

struct CacheEntry {
    value: String,
    stored_at: Instant,
}

pub struct InMemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl InMemoryCache {
    pub fn new(capacity: NonZeroUsize, ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        let capacity = NonZeroUsize::new(settings.capacity).ok_or_else(|| {
            ServerError::Config("cache.capacity must be greater than zero".to_string())
        })?;
        Ok(Self::new(capacity, settings.entry_ttl()))
    }

    /// Number of live and not yet evicted entries
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        match self.ttl {
            Some(ttl) => entry.stored_at.elapsed() < ttl,
            None => true,
        }
    }
}

#[async_trait]
impl CacheGateway for InMemoryCache {
    async fn get(&self, key: &str) -> tuneshelf_core::Result<CacheLookup> {
        let mut entries = self.entries.lock().await;

        let fresh = match entries.get(key) {
            Some(entry) if self.is_fresh(entry) => Some(entry.value.clone()),
            Some(_) => None,
            None => return Ok(CacheLookup::Miss),
        };

        match fresh {
            Some(value) => Ok(CacheLookup::Hit(value)),
            None => {
                entries.pop(key);
                Ok(CacheLookup::Miss)
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> tuneshelf_core::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.put(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> tuneshelf_core::Result<()> {
        self.entries.lock().await.pop(key);
        Ok(())
    }
}
