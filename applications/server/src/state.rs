/// Shared application state
use crate::services::{
    AlbumLikeService, AuthService, CollaborationService, ExportService, PlaylistService,
};
use std::sync::Arc;
use tuneshelf_core::{CacheGateway, QueueGateway};
use tuneshelf_storage::Database;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_service: Arc<AuthService>,
    pub collaborations: Arc<CollaborationService>,
    pub playlists: Arc<PlaylistService>,
    pub album_likes: Arc<AlbumLikeService>,
    pub exports: Arc<ExportService>,
}

impl AppState {
    /// Wire the services over already-constructed gateways
    pub fn new(
        db: Database,
        auth_service: Arc<AuthService>,
        cache: Arc<dyn CacheGateway>,
        queue: Arc<dyn QueueGateway>,
        export_topic: String,
    ) -> Self {
        let collaborations = Arc::new(CollaborationService::new(db.clone()));
        let playlists = Arc::new(PlaylistService::new(
            db.clone(),
            Arc::clone(&collaborations),
        ));
        let album_likes = Arc::new(AlbumLikeService::new(db.clone(), cache));
        let exports = Arc::new(ExportService::new(
            Arc::clone(&playlists),
            queue,
            export_topic,
        ));

        Self {
            db,
            auth_service,
            collaborations,
            playlists,
            album_likes,
            exports,
        }
    }
}
