//! Common test utilities and fixtures
//!
//! Every test gets its own SQLite file in a temp directory, the real
//! in-memory cache and queue, and whatever gateway doubles it asks for.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;
use tuneshelf_core::{
    types::{AlbumId, CreateAlbum, CreateSong, PlaylistId, SongId, UserId},
    CacheGateway, CacheLookup, CoreError, QueueGateway,
};
use tuneshelf_server::{
    services::{AuthService, InMemoryCache, InProcessQueue},
    state::AppState,
};
use tuneshelf_storage::{albums, songs, users, Database};

pub const EXPORT_TOPIC: &str = "export:playlists";
pub const JWT_SECRET: &str = "test-secret-key";

/// Test harness that keeps the database file alive
pub struct TestContext {
    pub state: AppState,
    pub cache: Arc<InMemoryCache>,
    pub queue: InProcessQueue,
    _temp_dir: TempDir,
}

impl TestContext {
    pub fn db(&self) -> &Database {
        &self.state.db
    }
}

/// Fresh migrated database file
pub async fn create_test_database() -> (Database, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

    let db = Database::connect(&db_url, 5)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");

    (db, temp_dir)
}

pub fn create_test_auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(JWT_SECRET.to_string(), 1, 1))
}

/// App state over the in-memory cache and queue
pub async fn create_test_context() -> TestContext {
    let (db, temp_dir) = create_test_database().await;
    let cache = Arc::new(InMemoryCache::new(
        std::num::NonZeroUsize::new(128).unwrap(),
        None,
    ));
    let queue = InProcessQueue::new();

    let state = AppState::new(
        db,
        create_test_auth_service(),
        cache.clone(),
        Arc::new(queue.clone()),
        EXPORT_TOPIC.to_string(),
    );

    TestContext {
        state,
        cache,
        queue,
        _temp_dir: temp_dir,
    }
}

/// App state over caller-supplied gateways
pub async fn create_test_state_with(
    cache: Arc<dyn CacheGateway>,
    queue: Arc<dyn QueueGateway>,
) -> (AppState, TempDir) {
    let (db, temp_dir) = create_test_database().await;
    let state = AppState::new(
        db,
        create_test_auth_service(),
        cache,
        queue,
        EXPORT_TOPIC.to_string(),
    );
    (state, temp_dir)
}

pub async fn create_user(db: &Database, username: &str) -> UserId {
    users::create(db.pool(), username, fixtures::PASSWORD_HASH, "Test User")
        .await
        .expect("Failed to create user")
}

pub async fn create_album(db: &Database, name: &str) -> AlbumId {
    albums::create(
        db.pool(),
        CreateAlbum {
            name: name.to_string(),
            year: 2008,
        },
    )
    .await
    .expect("Failed to create album")
}

pub async fn create_song(db: &Database, title: &str) -> SongId {
    songs::create(
        db.pool(),
        CreateSong {
            title: title.to_string(),
            year: 2008,
            genre: "Indie".to_string(),
            performer: "Test Band".to_string(),
            duration: Some(180),
            album_id: None,
        },
    )
    .await
    .expect("Failed to create song")
}

pub async fn create_playlist(state: &AppState, name: &str, owner: &UserId) -> PlaylistId {
    state
        .playlists
        .create(name, owner)
        .await
        .expect("Failed to create playlist")
}

/// Cache whose every operation fails
pub struct FailingCache;

#[async_trait]
impl CacheGateway for FailingCache {
    async fn get(&self, _key: &str) -> tuneshelf_core::Result<CacheLookup> {
        Err(CoreError::Cache("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: String) -> tuneshelf_core::Result<()> {
        Err(CoreError::Cache("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> tuneshelf_core::Result<()> {
        Err(CoreError::Cache("connection refused".to_string()))
    }
}

/// Cache that reads and deletes fine but cannot store
pub struct ReadOnlyCache;

#[async_trait]
impl CacheGateway for ReadOnlyCache {
    async fn get(&self, _key: &str) -> tuneshelf_core::Result<CacheLookup> {
        Ok(CacheLookup::Miss)
    }

    async fn set(&self, _key: &str, _value: String) -> tuneshelf_core::Result<()> {
        Err(CoreError::Cache("read-only replica".to_string()))
    }

    async fn delete(&self, _key: &str) -> tuneshelf_core::Result<()> {
        Ok(())
    }
}

/// Queue that refuses every message
pub struct FailingQueue;

#[async_trait]
impl QueueGateway for FailingQueue {
    async fn publish(&self, _topic: &str, _payload: Vec<u8>) -> tuneshelf_core::Result<()> {
        Err(CoreError::Queue("channel closed".to_string()))
    }
}

/// Test user credentials
pub mod fixtures {
    pub const PASSWORD: &str = "TestPassword123!";
    /// Not a real bcrypt hash; fine for rows that never log in
    pub const PASSWORD_HASH: &str = "not-a-real-hash";
}
