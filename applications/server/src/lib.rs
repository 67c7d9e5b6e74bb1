//! Tuneshelf Server Library
//!
//! Catalog and playlist HTTP service: albums, songs, playlists shared with
//! collaborators, album likes served cache-aside, and playlist export jobs
//! handed to a queue.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{
    album_likes::AlbumLikeService, auth::AuthService, cache::InMemoryCache,
    collaborations::CollaborationService, exports::ExportService, playlists::PlaylistService,
    queue::InProcessQueue,
};
pub use state::AppState;

/// Build the full `/api` router over `app_state`
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/users", post(api::users::register_user))
        .route(
            "/authentications",
            post(api::authentications::login)
                .put(api::authentications::refresh)
                .delete(api::authentications::logout),
        )
        .route("/albums", post(api::albums::create_album))
        .route(
            "/albums/:id",
            get(api::albums::get_album)
                .put(api::albums::update_album)
                .delete(api::albums::delete_album),
        )
        .route("/albums/:id/likes", get(api::albums::get_album_likes))
        .route(
            "/songs",
            post(api::songs::create_song).get(api::songs::list_songs),
        )
        .route(
            "/songs/:id",
            get(api::songs::get_song)
                .put(api::songs::update_song)
                .delete(api::songs::delete_song),
        );

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Likes
        .route(
            "/albums/:id/likes",
            post(api::albums::like_album).delete(api::albums::unlike_album),
        )
        // Playlists
        .route(
            "/playlists",
            post(api::playlists::create_playlist).get(api::playlists::list_playlists),
        )
        .route(
            "/playlists/:id",
            axum::routing::delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            post(api::playlists::add_song_to_playlist)
                .get(api::playlists::get_playlist_songs)
                .delete(api::playlists::remove_song_from_playlist),
        )
        .route(
            "/playlists/:id/activities",
            get(api::playlists::get_playlist_activities),
        )
        // Collaborations
        .route(
            "/collaborations",
            post(api::collaborations::add_collaborator)
                .delete(api::collaborations::remove_collaborator),
        )
        // Exports
        .route(
            "/export/playlists/:id",
            post(api::exports::export_playlist),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
