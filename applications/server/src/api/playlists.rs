/// Playlists, their songs and their activity log
use super::{
    created, created_message, success, success_message,
    validation::{require_text, MAX_ID_LEN, MAX_PLAYLIST_NAME_LEN},
    Created,
};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tuneshelf_core::{
    types::{PlaylistId, SongId},
    CoreError,
};
use tuneshelf_storage::songs;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongRequest {
    pub song_id: String,
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Created> {
    require_text("name", &req.name, MAX_PLAYLIST_NAME_LEN)?;

    let playlist_id = app_state
        .playlists
        .create(&req.name, auth.user_id())
        .await?;

    Ok(created("Playlist added", json!({ "playlistId": playlist_id })))
}

/// GET /api/playlists
/// Playlists owned by or shared with the caller
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlists = app_state.playlists.list_for_user(auth.user_id()).await?;
    Ok(success(json!({ "playlists": playlists })))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    app_state
        .playlists
        .delete(&PlaylistId::new(id), auth.user_id())
        .await?;

    Ok(success_message("Playlist deleted"))
}

/// POST /api/playlists/:id/songs
pub async fn add_song_to_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<PlaylistSongRequest>,
) -> Result<Created> {
    require_text("songId", &req.song_id, MAX_ID_LEN)?;

    let playlist_id = PlaylistId::new(id);
    let song_id = SongId::new(req.song_id);
    let user_id = auth.user_id();

    app_state.playlists.verify_access(&playlist_id, user_id).await?;

    if songs::get_by_id(app_state.db.pool(), &song_id)
        .await?
        .is_none()
    {
        return Err(CoreError::not_found("Song not found").into());
    }

    app_state
        .playlists
        .add_song_logged(&playlist_id, &song_id, user_id)
        .await?;

    Ok(created_message("Song added to playlist"))
}

/// GET /api/playlists/:id/songs
pub async fn get_playlist_songs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;

    let playlist = app_state.playlists.get_with_songs(&playlist_id).await?;
    Ok(success(json!({ "playlist": playlist })))
}

/// DELETE /api/playlists/:id/songs
pub async fn remove_song_from_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<PlaylistSongRequest>,
) -> Result<Json<Value>> {
    require_text("songId", &req.song_id, MAX_ID_LEN)?;

    let playlist_id = PlaylistId::new(id);
    let song_id = SongId::new(req.song_id);
    let user_id = auth.user_id();

    app_state.playlists.verify_access(&playlist_id, user_id).await?;
    app_state
        .playlists
        .remove_song_logged(&playlist_id, &song_id, user_id)
        .await?;

    Ok(success_message("Song deleted from playlist"))
}

/// GET /api/playlists/:id/activities
pub async fn get_playlist_activities(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_access(&playlist_id, auth.user_id())
        .await?;

    let activities = app_state.playlists.list_activities(&playlist_id).await?;
    Ok(success(json!(activities)))
}
