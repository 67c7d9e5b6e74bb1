/// Album catalog and album likes
use super::{
    created, created_message, success, success_message,
    validation::{require_text, require_year, MAX_NAME_LEN},
    Created,
};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tuneshelf_core::{
    types::{AlbumId, CreateAlbum},
    CoreError,
};
use tuneshelf_storage::albums;

/// Header marking a response served from the like-count cache
pub const DATA_SOURCE_HEADER: &str = "X-Data-Source";

fn validate(album: &CreateAlbum) -> Result<()> {
    require_text("name", &album.name, MAX_NAME_LEN)?;
    require_year(album.year)
}

/// POST /api/albums
pub async fn create_album(
    State(app_state): State<AppState>,
    Json(req): Json<CreateAlbum>,
) -> Result<Created> {
    validate(&req)?;
    let album_id = albums::create(app_state.db.pool(), req).await?;
    Ok(created("Album added", json!({ "albumId": album_id })))
}

/// GET /api/albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let album = albums::get_with_songs(app_state.db.pool(), &AlbumId::new(id))
        .await?
        .ok_or_else(|| CoreError::not_found("Album not found"))?;

    Ok(success(json!({ "album": album })))
}

/// PUT /api/albums/:id
pub async fn update_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<CreateAlbum>,
) -> Result<Json<Value>> {
    validate(&req)?;
    albums::update(app_state.db.pool(), &AlbumId::new(id), req).await?;
    Ok(success_message("Album updated"))
}

/// DELETE /api/albums/:id
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    albums::delete(app_state.db.pool(), &AlbumId::new(id)).await?;
    Ok(success_message("Album deleted"))
}

/// POST /api/albums/:id/likes
pub async fn like_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Created> {
    let album_id = AlbumId::new(id);

    if albums::get_by_id(app_state.db.pool(), &album_id)
        .await?
        .is_none()
    {
        return Err(CoreError::not_found("Album not found").into());
    }

    app_state
        .album_likes
        .like(&album_id, auth.user_id())
        .await?;

    Ok(created_message("Album liked"))
}

/// DELETE /api/albums/:id/likes
pub async fn unlike_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    app_state
        .album_likes
        .unlike(&AlbumId::new(id), auth.user_id())
        .await?;

    Ok(success_message("Album unliked"))
}

/// GET /api/albums/:id/likes
pub async fn get_album_likes(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Response> {
    let likes = app_state
        .album_likes
        .get_like_count(&AlbumId::new(id))
        .await?;

    let mut response = success(json!({ "likes": likes.value })).into_response();
    if likes.from_cache {
        response
            .headers_mut()
            .insert(DATA_SOURCE_HEADER, HeaderValue::from_static("cache"));
    }

    Ok(response)
}
