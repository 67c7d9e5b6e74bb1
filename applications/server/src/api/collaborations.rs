/// Collaborator grants
use super::{
    created, success_message,
    validation::{require_text, MAX_ID_LEN},
    Created,
};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tuneshelf_core::{
    types::{PlaylistId, UserId},
    CoreError,
};
use tuneshelf_storage::users;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub playlist_id: String,
    pub user_id: String,
}

impl CollaborationRequest {
    fn ids(self) -> Result<(PlaylistId, UserId)> {
        require_text("playlistId", &self.playlist_id, MAX_ID_LEN)?;
        require_text("userId", &self.user_id, MAX_ID_LEN)?;
        Ok((PlaylistId::new(self.playlist_id), UserId::new(self.user_id)))
    }
}

/// POST /api/collaborations
/// Owner grants another user access to a playlist
pub async fn add_collaborator(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<Created> {
    let (playlist_id, collaborator) = req.ids()?;

    app_state
        .playlists
        .verify_owner(&playlist_id, auth.user_id())
        .await?;

    if users::get_by_id(app_state.db.pool(), &collaborator)
        .await?
        .is_none()
    {
        return Err(CoreError::not_found("User not found").into());
    }

    let collaboration_id = app_state
        .collaborations
        .add(&playlist_id, &collaborator)
        .await?;

    Ok(created(
        "Collaboration added",
        json!({ "collaborationId": collaboration_id }),
    ))
}

/// DELETE /api/collaborations
pub async fn remove_collaborator(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CollaborationRequest>,
) -> Result<Json<Value>> {
    let (playlist_id, collaborator) = req.ids()?;

    app_state
        .playlists
        .verify_owner(&playlist_id, auth.user_id())
        .await?;

    app_state
        .collaborations
        .delete(&playlist_id, &collaborator)
        .await?;

    Ok(success_message("Collaboration deleted"))
}
