/// Playlist domain types
use super::{PlaylistId, SongSummary, UserId};
use serde::{Deserialize, Serialize};

/// Playlist
///
/// Ownership is fixed at creation and never transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Owner user ID
    pub owner: UserId,
}

/// Playlist listing entry, with the owner's username for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
}

/// Playlist with its member songs in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithSongs {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}
