/// Song catalog
use super::{
    created, success, success_message,
    validation::{require_text, require_year, MAX_NAME_LEN},
    Created,
};
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tuneshelf_core::{
    types::{CreateSong, SongFilter, SongId},
    CoreError,
};
use tuneshelf_storage::songs;

fn validate(song: &CreateSong) -> Result<()> {
    require_text("title", &song.title, MAX_NAME_LEN)?;
    require_year(song.year)?;
    require_text("genre", &song.genre, MAX_NAME_LEN)?;
    require_text("performer", &song.performer, MAX_NAME_LEN)?;
    if song.duration.is_some_and(|d| d < 0) {
        return Err(CoreError::invalid_input("\"duration\" must not be negative").into());
    }
    Ok(())
}

/// POST /api/songs
pub async fn create_song(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSong>,
) -> Result<Created> {
    validate(&req)?;
    let song_id = songs::create(app_state.db.pool(), req).await?;
    Ok(created("Song added", json!({ "songId": song_id })))
}

/// GET /api/songs?title=&performer=
pub async fn list_songs(
    State(app_state): State<AppState>,
    Query(filter): Query<SongFilter>,
) -> Result<Json<Value>> {
    let songs = songs::search(app_state.db.pool(), &filter).await?;
    Ok(success(json!({ "songs": songs })))
}

/// GET /api/songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let song = songs::get_by_id(app_state.db.pool(), &SongId::new(id))
        .await?
        .ok_or_else(|| CoreError::not_found("Song not found"))?;

    Ok(success(json!({ "song": song })))
}

/// PUT /api/songs/:id
pub async fn update_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<CreateSong>,
) -> Result<Json<Value>> {
    validate(&req)?;
    songs::update(app_state.db.pool(), &SongId::new(id), req).await?;
    Ok(success_message("Song updated"))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    songs::delete(app_state.db.pool(), &SongId::new(id)).await?;
    Ok(success_message("Song deleted"))
}
