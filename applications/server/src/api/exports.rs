/// Playlist export requests
use super::{created_message, validation::require_email, Created};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tuneshelf_core::types::PlaylistId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistRequest {
    pub target_email: String,
}

/// POST /api/export/playlists/:id
pub async fn export_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<ExportPlaylistRequest>,
) -> Result<Created> {
    require_email("targetEmail", &req.target_email)?;

    app_state
        .exports
        .request_export(&PlaylistId::new(id), auth.user_id(), &req.target_email)
        .await?;

    Ok(created_message("Your request is in the queue"))
}
