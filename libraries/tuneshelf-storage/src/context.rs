use crate::{create_pool, run_migrations, StorageError};
use sqlx::SqlitePool;

/// Handle to the `SQLite` database shared by all request handlers
///
/// Cheap to clone: the pool is reference counted internally.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url`, creating the file if missing
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = create_pool(database_url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (for testing)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<(), StorageError> {
        run_migrations(&self.pool).await
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
