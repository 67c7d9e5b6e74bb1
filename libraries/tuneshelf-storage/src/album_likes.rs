//! User → album like edges
//!
//! At most one like per (user, album); the `unique_user_album` constraint is
//! the source of truth for that, `exists` is only a cheap pre-check.

use sqlx::{Row, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

use crate::is_unique_violation;

/// Whether `user_id` already likes `album_id`
pub async fn exists(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id.as_str())
        .bind(album_id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Insert a like edge
///
/// A uniqueness violation is reported as `Invariant`, same as the pre-check.
pub async fn add(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<AlbumLikeId> {
    let id = AlbumLikeId::generate();

    let row = sqlx::query(
        "INSERT INTO user_album_likes (id, user_id, album_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(id.as_str())
    .bind(user_id.as_str())
    .bind(album_id.as_str())
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CoreError::invariant("Failed to like the album")
        } else {
            CoreError::from(e)
        }
    })?;

    row.map(|r| AlbumLikeId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Failed to like the album"))
}

/// Delete a like edge
pub async fn delete(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE album_id = ? AND user_id = ?")
        .bind(album_id.as_str())
        .bind(user_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::invariant("Failed to remove like the album"));
    }

    Ok(())
}

/// Authoritative like count; an album nobody liked counts 0
pub async fn count(pool: &SqlitePool, album_id: &AlbumId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS likes FROM user_album_likes WHERE album_id = ?")
        .bind(album_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("likes") as u64)
}
