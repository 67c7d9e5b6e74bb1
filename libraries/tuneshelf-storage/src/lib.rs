//! Tuneshelf Storage
//!
//! `SQLite` persistence layer for the Tuneshelf catalog and playlist service.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table family owns its own queries in a module
//!   (`albums`, `songs`, `playlists`, `activities`, ...)
//! - **Plain functions over a pool**: slices take a `&SqlitePool` and return
//!   `tuneshelf_core::Result`, so callers decide transaction and caching policy
//! - **Constraints are authoritative**: uniqueness and cascades are enforced by
//!   the schema, not by application locking
//!
//! # Example
//!
//! ```rust,no_run
//! use tuneshelf_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://tuneshelf.db", 5).await?;
//! db.migrate().await?;
//!
//! let playlists = tuneshelf_storage::playlists::get_for_user(
//!     db.pool(),
//!     &tuneshelf_core::UserId::new("user-1"),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod activities;
pub mod album_likes;
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod playlist_songs;
pub mod playlists;
pub mod songs;
pub mod users;

pub use context::Database;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tuneshelf.db>`)
/// * `max_connections` - Upper bound on pooled connections
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true) // collaborations and activities rely on ON DELETE CASCADE
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("Pool created with {} max connections", max_connections);

    Ok(pool)
}

/// Whether a `sqlx` error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Whether a `sqlx` error is a FOREIGN KEY constraint violation
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
