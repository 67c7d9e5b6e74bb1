use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

use crate::songs;

/// Create new album
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<AlbumId> {
    let id = AlbumId::generate();

    let row = sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, ?) RETURNING id")
        .bind(id.as_str())
        .bind(&album.name)
        .bind(album.year)
        .fetch_optional(pool)
        .await?;

    row.map(|r| AlbumId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Failed to add album"))
}

/// Get album by ID
pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, year, cover FROM albums WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(album_from_row))
}

/// Get album with the songs that reference it
pub async fn get_with_songs(pool: &SqlitePool, id: &AlbumId) -> Result<Option<AlbumWithSongs>> {
    let Some(album) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let songs = songs::get_by_album(pool, id).await?;

    Ok(Some(AlbumWithSongs { album, songs }))
}

/// Replace album name and year
pub async fn update(pool: &SqlitePool, id: &AlbumId, album: CreateAlbum) -> Result<()> {
    let result = sqlx::query(
        "UPDATE albums SET name = ?, year = ?, updated_at = datetime('now') WHERE id = ?",
    )
    .bind(&album.name)
    .bind(album.year)
    .bind(id.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Failed to update album. Id not found"));
    }

    Ok(())
}

/// Delete album
pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Failed to delete album. Id not found"));
    }

    Ok(())
}

fn album_from_row(row: &SqliteRow) -> Album {
    Album {
        id: AlbumId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        year: row.get("year"),
        cover_url: row.get("cover"),
    }
}
