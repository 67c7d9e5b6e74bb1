/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tuneshelf_core::CoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message returned for every error whose detail must stay server-side
pub const GENERIC_FAILURE_MESSAGE: &str = "There was a failure on our server";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Shorthand for a 400 `fail` response
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ServerError::Core(CoreError::invalid_input(msg))
    }

    /// Shorthand for a 401 `fail` response
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        ServerError::Core(CoreError::Unauthenticated(msg.into()))
    }

    /// Status code and client-safe message for this error
    ///
    /// Returns `None` for the message when the error is internal.
    fn classify(&self) -> (StatusCode, Option<String>) {
        match self {
            ServerError::Core(err) => match err {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, Some(msg.clone())),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, Some(msg.clone())),
                CoreError::Invariant(msg) | CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, Some(msg.clone()))
                }
                CoreError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, Some(msg.clone())),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, None),
            },
            ServerError::Jwt(_) => (StatusCode::UNAUTHORIZED, Some("Invalid token".to_string())),
            ServerError::Config(_) | ServerError::Bcrypt(_) | ServerError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        }
    }
}

impl From<tuneshelf_storage::StorageError> for ServerError {
    fn from(err: tuneshelf_storage::StorageError) -> Self {
        ServerError::Core(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.classify();

        let body = match message {
            Some(message) => json!({
                "status": "fail",
                "message": message,
            }),
            None => {
                tracing::error!("Request failed: {:?}", self);
                json!({
                    "status": "error",
                    "message": GENERIC_FAILURE_MESSAGE,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
