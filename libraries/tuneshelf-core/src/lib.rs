//! Tuneshelf Core
//!
//! Storage-agnostic domain types, gateway traits, and error handling shared by
//! the storage layer and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `Song`, `Playlist`, `PlaylistSongActivity`, etc.
//! - **Gateway Traits**: `CacheGateway` and `QueueGateway`, the two outbound
//!   collaborators besides the database
//! - **Error Handling**: the unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tuneshelf_core::types::{ActivityAction, PlaylistId, UserId};
//!
//! let owner = UserId::generate();
//! let playlist = PlaylistId::generate();
//! assert!(playlist.as_str().starts_with("playlist-"));
//! assert_eq!(ActivityAction::Add.as_str(), "add");
//! # let _ = owner;
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{CacheGateway, CacheLookup, QueueGateway};

pub use types::{
    ActivityAction, Album, AlbumId, AlbumLikeId, AlbumWithSongs, CollaborationId, CreateAlbum,
    CreateSong, CreateUser, ExportPlaylistMessage, LikeCount, Playlist, PlaylistActivities,
    PlaylistId, PlaylistSongActivity, PlaylistSongId, PlaylistSummary, PlaylistWithSongs, Song,
    SongFilter, SongId, SongSummary, User, UserId,
};
