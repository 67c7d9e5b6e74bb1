//! Album likes with a cache-aside like counter
//!
//! Counts live under `album:{id}` and are dropped on every like or unlike
//! of that album before the write. The database stays authoritative: any
//! cache problem degrades to a database read.

use std::sync::Arc;
use tuneshelf_core::{
    error::Result,
    types::{AlbumId, AlbumLikeId, LikeCount, UserId},
    CacheGateway, CoreError,
};
use tuneshelf_storage::{album_likes, Database};

pub fn cache_key(album_id: &AlbumId) -> String {
    format!("album:{}", album_id.as_str())
}

pub struct AlbumLikeService {
    db: Database,
    cache: Arc<dyn CacheGateway>,
}

impl AlbumLikeService {
    pub fn new(db: Database, cache: Arc<dyn CacheGateway>) -> Self {
        Self { db, cache }
    }

    pub async fn like(&self, album_id: &AlbumId, user_id: &UserId) -> Result<AlbumLikeId> {
        self.invalidate(album_id).await?;

        if album_likes::exists(self.db.pool(), album_id, user_id).await? {
            return Err(CoreError::invariant("Failed to like the album"));
        }

        let id = album_likes::add(self.db.pool(), album_id, user_id).await?;
        tracing::info!("{} liked album {}", user_id.as_str(), album_id.as_str());
        Ok(id)
    }

    pub async fn unlike(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        self.invalidate(album_id).await?;

        album_likes::delete(self.db.pool(), album_id, user_id).await?;
        tracing::info!("{} unliked album {}", user_id.as_str(), album_id.as_str());
        Ok(())
    }

    pub async fn get_like_count(&self, album_id: &AlbumId) -> Result<LikeCount> {
        let key = cache_key(album_id);

        if let Some(value) = self.read_cached(&key).await {
            return Ok(LikeCount {
                value,
                from_cache: true,
            });
        }

        let value = album_likes::count(self.db.pool(), album_id).await?;

        if let Err(err) = self.cache.set(&key, value.to_string()).await {
            tracing::warn!("Failed to cache like count for {}: {}", key, err);
        }

        Ok(LikeCount {
            value,
            from_cache: false,
        })
    }

    /// Cached count, or `None` on a miss, read error or unparsable value
    async fn read_cached(&self, key: &str) -> Option<u64> {
        let raw = match self.cache.get(key).await {
            Ok(lookup) => lookup.into_value()?,
            Err(err) => {
                tracing::warn!("Cache read for {} failed: {}", key, err);
                return None;
            }
        };

        match raw.parse::<u64>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparsable cached value {:?} for {}", raw, key);
                None
            }
        }
    }

    async fn invalidate(&self, album_id: &AlbumId) -> Result<()> {
        self.cache.delete(&cache_key(album_id)).await
    }
}
