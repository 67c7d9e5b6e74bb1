mod activity;
mod album;
mod export;
mod ids;
mod likes;
mod playlist;
mod song;
mod user;

pub use activity::{ActivityAction, PlaylistActivities, PlaylistSongActivity};
pub use album::{Album, AlbumWithSongs, CreateAlbum};
pub use export::ExportPlaylistMessage;
pub use ids::{
    ActivityId, AlbumId, AlbumLikeId, CollaborationId, PlaylistId, PlaylistSongId, SongId, UserId,
};
pub use likes::LikeCount;
pub use playlist::{Playlist, PlaylistSummary, PlaylistWithSongs};
pub use song::{CreateSong, Song, SongFilter, SongSummary};
pub use user::{CreateUser, User};
