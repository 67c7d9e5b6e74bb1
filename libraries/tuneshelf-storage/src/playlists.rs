use sqlx::{Row, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

/// Create new playlist owned by `owner`
pub async fn create(pool: &SqlitePool, name: &str, owner: &UserId) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    let row = sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?) RETURNING id")
        .bind(id.as_str())
        .bind(name)
        .bind(owner.as_str())
        .fetch_optional(pool)
        .await?;

    row.map(|r| PlaylistId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Playlist failed to add"))
}

/// Get playlist by ID (no permission check)
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, owner FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Playlist {
        id: PlaylistId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        owner: UserId::new(row.get::<String, _>("owner")),
    }))
}

/// Get user's playlists (owned + shared with them)
pub async fn get_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username, p.rowid
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = ? OR c.user_id = ?
        ORDER BY p.rowid
        "#,
    )
    .bind(user_id.as_str())
    .bind(user_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: PlaylistId::new(row.get::<String, _>("id")),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

/// Get playlist with owner username and all member songs
///
/// A playlist without songs is returned with an empty list.
pub async fn get_with_songs(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<PlaylistWithSongs>> {
    let Some(header) = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        WHERE p.id = ?
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let song_rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM playlist_songs ps
        INNER JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.rowid
        "#,
    )
    .bind(id.as_str())
    .fetch_all(pool)
    .await?;

    let songs = song_rows
        .into_iter()
        .map(|row| SongSummary {
            id: SongId::new(row.get::<String, _>("id")),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect();

    Ok(Some(PlaylistWithSongs {
        id: PlaylistId::new(header.get::<String, _>("id")),
        name: header.get("name"),
        username: header.get("username"),
        songs,
    }))
}

/// Delete playlist; collaborations, memberships and activities cascade
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found(
            "Failed to delete playlist. Id not found",
        ));
    }

    Ok(())
}
