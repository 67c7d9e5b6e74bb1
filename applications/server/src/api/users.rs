/// User registration
use super::{
    created,
    validation::{require_text, MAX_NAME_LEN},
    Created,
};
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde_json::json;
use tuneshelf_core::types::CreateUser;
use tuneshelf_storage::users;

const MAX_USERNAME_LEN: usize = 50;

/// POST /api/users
pub async fn register_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUser>,
) -> Result<Created> {
    require_text("username", &req.username, MAX_USERNAME_LEN)?;
    require_text("password", &req.password, MAX_NAME_LEN)?;
    require_text("fullname", &req.fullname, MAX_NAME_LEN)?;

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user_id = users::create(
        app_state.db.pool(),
        &req.username,
        &password_hash,
        &req.fullname,
    )
    .await?;

    tracing::info!("Registered user {} ({})", req.username, user_id.as_str());

    Ok(created("User added", json!({ "userId": user_id })))
}
