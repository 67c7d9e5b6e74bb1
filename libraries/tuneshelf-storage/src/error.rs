/// Storage-specific errors
use thiserror::Error;

/// Storage error types
///
/// Only setup concerns (connecting, migrating) surface as `StorageError`;
/// query failures inside the slices are reported as `tuneshelf_core::CoreError`.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for tuneshelf_core::CoreError {
    fn from(err: StorageError) -> Self {
        tuneshelf_core::CoreError::database(err.to_string())
    }
}
