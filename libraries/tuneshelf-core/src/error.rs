/// Core error types for Tuneshelf
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tuneshelf
///
/// The first five variants are client-facing: they carry a stable message that
/// is safe to return over HTTP. Everything else is an internal failure whose
/// detail must only be logged.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Referenced entity is absent
    #[error("{0}")]
    NotFound(String),

    /// Authenticated principal lacks rights on the resource
    #[error("{0}")]
    Forbidden(String),

    /// A required post-condition of a write failed
    #[error("{0}")]
    Invariant(String),

    /// Request payload failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Credentials or token could not be verified
    #[error("{0}")]
    Unauthenticated(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Cache gateway errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Queue gateway errors
    #[error("Queue error: {0}")]
    Queue(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Whether the error carries a message meant for the caller
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Forbidden(_)
                | Self::Invariant(_)
                | Self::InvalidInput(_)
                | Self::Unauthenticated(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
