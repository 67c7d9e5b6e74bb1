//! Append-only playlist activity log

use sqlx::{Row, SqliteExecutor, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

/// Append one activity entry; the timestamp is assigned by the database
pub async fn add<'e, E>(
    executor: E,
    playlist_id: &PlaylistId,
    song_id: &SongId,
    user_id: &UserId,
    action: ActivityAction,
) -> Result<ActivityId>
where
    E: SqliteExecutor<'e>,
{
    let id = ActivityId::generate();

    let row = sqlx::query(
        r#"
        INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(id.as_str())
    .bind(playlist_id.as_str())
    .bind(song_id.as_str())
    .bind(user_id.as_str())
    .bind(action.as_str())
    .fetch_optional(executor)
    .await?;

    row.map(|r| ActivityId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("Song failed to add to playlist activity"))
}

/// All entries for a playlist in insertion order, joined for display
///
/// Entries whose song or user has since been deleted fall back to the raw id.
///
/// Returns an empty list both for a playlist without history and for an
/// unknown playlist; callers check existence separately.
pub async fn get_by_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<Vec<PlaylistSongActivity>> {
    let rows = sqlx::query(
        r#"
        SELECT
            COALESCE(u.username, psa.user_id) AS username,
            COALESCE(s.title, psa.song_id) AS title,
            psa.action,
            psa.time
        FROM playlist_song_activities psa
        LEFT JOIN users u ON u.id = psa.user_id
        LEFT JOIN songs s ON s.id = psa.song_id
        WHERE psa.playlist_id = ?
        ORDER BY psa.rowid
        "#,
    )
    .bind(playlist_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let action = row
                .get::<String, _>("action")
                .parse::<ActivityAction>()
                .map_err(CoreError::database)?;

            Ok(PlaylistSongActivity {
                username: row.get("username"),
                title: row.get("title"),
                action,
                time: row.get("time"),
            })
        })
        .collect()
}

/// Number of raw entries for a playlist, regardless of joins
pub async fn count(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM playlist_song_activities WHERE playlist_id = ?")
        .bind(playlist_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("n") as u64)
}
