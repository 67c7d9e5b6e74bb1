use sqlx::{Row, SqlitePool};
use tuneshelf_core::error::Result;

/// Remember an issued refresh token
pub async fn add(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO authentications (token) VALUES (?)")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Whether `token` is a currently stored refresh token
pub async fn exists(pool: &SqlitePool, token: &str) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM authentications WHERE token = ?")
        .bind(token)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("n") > 0)
}

/// Forget a refresh token; returns false if it was not stored
pub async fn delete(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM authentications WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
