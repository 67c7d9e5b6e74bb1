/// Server services
pub mod album_likes;
pub mod auth;
pub mod cache;
pub mod collaborations;
pub mod exports;
pub mod playlists;
pub mod queue;

pub use album_likes::AlbumLikeService;
pub use auth::AuthService;
pub use cache::InMemoryCache;
pub use collaborations::CollaborationService;
pub use exports::ExportService;
pub use playlists::PlaylistService;
pub use queue::InProcessQueue;
