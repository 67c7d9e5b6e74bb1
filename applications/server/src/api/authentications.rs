/// Login, token refresh and logout
use super::{created, success, success_message, validation::require_text, Created};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tuneshelf_storage::{authentications, users};

const WRONG_CREDENTIALS: &str = "The credentials you provided are wrong";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// POST /api/authentications
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Created> {
    require_text("username", &req.username, usize::MAX)?;
    require_text("password", &req.password, usize::MAX)?;

    let (user_id, password_hash) = users::get_credentials(app_state.db.pool(), &req.username)
        .await?
        .ok_or_else(|| ServerError::unauthenticated(WRONG_CREDENTIALS))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::unauthenticated(WRONG_CREDENTIALS));
    }

    let tokens = app_state.auth_service.issue_tokens(&user_id)?;
    authentications::add(app_state.db.pool(), &tokens.refresh_token).await?;

    tracing::info!("User {} logged in", user_id.as_str());

    Ok(created("Authentication added", json!(tokens)))
}

/// PUT /api/authentications
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<Value>> {
    require_text("refreshToken", &req.refresh_token, usize::MAX)?;

    if !authentications::exists(app_state.db.pool(), &req.refresh_token).await? {
        return Err(ServerError::invalid_input(INVALID_REFRESH_TOKEN));
    }

    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)
        .map_err(|e| {
            tracing::warn!("Stored refresh token failed verification: {}", e);
            ServerError::invalid_input(INVALID_REFRESH_TOKEN)
        })?;

    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(success(json!({ "accessToken": access_token })))
}

/// DELETE /api/authentications
pub async fn logout(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<Value>> {
    require_text("refreshToken", &req.refresh_token, usize::MAX)?;

    if !authentications::delete(app_state.db.pool(), &req.refresh_token).await? {
        return Err(ServerError::invalid_input(INVALID_REFRESH_TOKEN));
    }

    Ok(success_message("Refresh token deleted"))
}
