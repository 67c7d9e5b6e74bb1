use sqlx::{Row, SqlitePool};
use tuneshelf_core::{error::Result, types::*, CoreError};

use crate::is_unique_violation;

/// Insert a user with an already-hashed password
///
/// Fails with `Invariant` when the username is taken.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    fullname: &str,
) -> Result<UserId> {
    if username_exists(pool, username).await? {
        return Err(CoreError::invariant(
            "Failed to add user. Username already used.",
        ));
    }

    let id = UserId::generate();

    // The pre-check above races with concurrent registrations; the UNIQUE
    // constraint decides.
    let row = sqlx::query(
        "INSERT INTO users (id, username, password, fullname) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(id.as_str())
    .bind(username)
    .bind(password_hash)
    .bind(fullname)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CoreError::invariant("Failed to add user. Username already used.")
        } else {
            CoreError::from(e)
        }
    })?;

    row.map(|r| UserId::new(r.get::<String, _>("id")))
        .ok_or_else(|| CoreError::invariant("User failed to add"))
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| User {
        id: UserId::new(row.get::<String, _>("id")),
        username: row.get("username"),
        fullname: row.get("fullname"),
    }))
}

/// Get the ID and password hash stored for `username`
pub async fn get_credentials(pool: &SqlitePool, username: &str) -> Result<Option<(UserId, String)>> {
    let row = sqlx::query("SELECT id, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| {
        (
            UserId::new(row.get::<String, _>("id")),
            row.get::<String, _>("password"),
        )
    }))
}

async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
