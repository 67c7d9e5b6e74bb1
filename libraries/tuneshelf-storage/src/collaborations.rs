use sqlx::{Row, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

use crate::is_unique_violation;

/// Grant `user_id` collaborator access to a playlist
pub async fn add(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<CollaborationId> {
    let id = CollaborationId::generate();

    let row = sqlx::query(
        "INSERT INTO collaborations (id, playlist_id, user_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(id.as_str())
    .bind(playlist_id.as_str())
    .bind(user_id.as_str())
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CoreError::invariant("Collaboration already exists")
        } else {
            CoreError::from(e)
        }
    })?;

    row.map(|r| CollaborationId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Collaboration failed to add"))
}

/// Revoke a collaboration grant
pub async fn delete(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id.as_str())
        .bind(user_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::invariant("Collaboration failed to delete"));
    }

    Ok(())
}

/// Whether a (playlist, user) grant exists
pub async fn exists(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Number of grants on a playlist
pub async fn count_for_playlist(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM collaborations WHERE playlist_id = ?")
        .bind(playlist_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("n") as u64)
}
