/// Bearer token authentication
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tuneshelf_core::UserId;

/// Authenticated caller, inserted into request extensions by
/// [`auth_middleware`] and usable as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Rejects requests without a valid `Authorization: Bearer` access token
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ServerError::unauthenticated("Missing authentication").into_response();
    };

    let user_id = match auth_service.verify_access_token(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::warn!("Token verification failed: {}", e);
            return ServerError::unauthenticated("Invalid token").into_response();
        }
    };

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    next.run(request).await
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::unauthenticated("Missing authentication"))
    }
}
