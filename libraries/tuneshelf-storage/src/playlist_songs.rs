//! Playlist membership edges
//!
//! These functions only mutate membership. Access checks and the activity log
//! entry that must follow each successful call are the caller's job. `add`
//! and `remove` accept any executor so they can share a transaction with that
//! log entry.

use sqlx::{Row, SqliteExecutor, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

/// Add song to playlist, returning the new edge ID
pub async fn add<'e, E>(executor: E, playlist_id: &PlaylistId, song_id: &SongId) -> Result<PlaylistSongId>
where
    E: SqliteExecutor<'e>,
{
    let id = PlaylistSongId::generate();

    let row = sqlx::query(
        "INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(id.as_str())
    .bind(playlist_id.as_str())
    .bind(song_id.as_str())
    .fetch_optional(executor)
    .await?;

    row.map(|r| PlaylistSongId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Song failed to add to playlist"))
}

/// Remove song from playlist
///
/// Fails with `Invariant` when the song was not a member.
pub async fn remove<'e, E>(executor: E, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id.as_str())
        .bind(song_id.as_str())
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::invariant("Song failed to delete from playlist."));
    }

    Ok(())
}

/// Number of membership edges in a playlist
pub async fn count(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM playlist_songs WHERE playlist_id = ?")
        .bind(playlist_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("n") as u64)
}
