use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

use crate::is_foreign_key_violation;

/// Create new song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<SongId> {
    let id = SongId::generate();

    let row = sqlx::query(
        r#"
        INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(id.as_str())
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(song.album_id.as_ref().map(|a| a.as_str()))
    .fetch_optional(pool)
    .await
    .map_err(album_reference_error)?;

    row.map(|r| SongId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Song failed to add"))
}

/// Search songs by case-insensitive title and/or performer substring
pub async fn search(pool: &SqlitePool, filter: &SongFilter) -> Result<Vec<SongSummary>> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, title, performer FROM songs WHERE 1 = 1");

    // SQLite LIKE is case-insensitive for ASCII
    if let Some(title) = filter.title.as_deref().filter(|t| !t.is_empty()) {
        query.push(" AND title LIKE ").push_bind(format!("%{}%", title));
    }
    if let Some(performer) = filter.performer.as_deref().filter(|p| !p.is_empty()) {
        query
            .push(" AND performer LIKE ")
            .push_bind(format!("%{}%", performer));
    }
    query.push(" ORDER BY rowid");

    let rows = query.build().fetch_all(pool).await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, year, genre, performer, duration, album_id FROM songs WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Song {
        id: SongId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        year: row.get("year"),
        genre: row.get("genre"),
        performer: row.get("performer"),
        duration: row.get("duration"),
        album_id: row.get::<Option<String>, _>("album_id").map(AlbumId::new),
    }))
}

/// Get songs belonging to an album
pub async fn get_by_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query("SELECT id, title, performer FROM songs WHERE album_id = ? ORDER BY rowid")
        .bind(album_id.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

/// Replace all song fields
pub async fn update(pool: &SqlitePool, id: &SongId, song: CreateSong) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, year = ?, genre = ?, performer = ?, duration = ?, album_id = ?,
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(song.album_id.as_ref().map(|a| a.as_str()))
    .bind(id.as_str())
    .execute(pool)
    .await
    .map_err(album_reference_error)?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Failed to update song. Id not found"));
    }

    Ok(())
}

/// Delete song
pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Failed to delete song. Id not found"));
    }

    Ok(())
}

fn summary_from_row(row: &SqliteRow) -> SongSummary {
    SongSummary {
        id: SongId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        performer: row.get("performer"),
    }
}

fn album_reference_error(err: sqlx::Error) -> CoreError {
    if is_foreign_key_violation(&err) {
        CoreError::invariant("Song references an unknown album")
    } else {
        CoreError::from(err)
    }
}
