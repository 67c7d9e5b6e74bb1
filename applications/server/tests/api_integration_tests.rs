/// API integration tests
/// Tests complete HTTP request/response cycles with real database
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use common::*;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use tuneshelf_core::types::UserId;
use tuneshelf_server::create_router;

fn bearer(ctx: &TestContext, user_id: &UserId) -> String {
    let token = ctx.state.auth_service.create_access_token(user_id).unwrap();
    format!("Bearer {}", token)
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());

    let response = send(&app, empty_request("GET", "/api/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());

    let response = send(&app, empty_request("GET", "/api/playlists", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["status"], "fail");

    let response = send(
        &app,
        empty_request("GET", "/api/playlists", Some("Bearer not-a-jwt")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_refresh_logout() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            None,
            json!({ "username": "listener", "password": fixtures::PASSWORD, "fullname": "Test Listener" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["data"]["userId"].as_str().unwrap().starts_with("user-"));

    let duplicate = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            None,
            json!({ "username": "listener", "password": "other", "fullname": "Someone" }),
        ),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    let wrong = send(
        &app,
        json_request(
            "POST",
            "/api/authentications",
            None,
            json!({ "username": "listener", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/authentications",
            None,
            json!({ "username": "listener", "password": fixtures::PASSWORD }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let access_token = body["data"]["accessToken"].as_str().unwrap().to_string();
    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = send(
        &app,
        empty_request(
            "GET",
            "/api/playlists",
            Some(format!("Bearer {}", access_token).as_str()),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/authentications",
            None,
            json!({ "refreshToken": refresh_token }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["accessToken"].is_string());

    let response = send(
        &app,
        json_request(
            "DELETE",
            "/api/authentications",
            None,
            json!({ "refreshToken": refresh_token }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logged out tokens can no longer refresh
    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/authentications",
            None,
            json!({ "refreshToken": refresh_token }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_playlist_song_flow_and_activities() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());
    let owner = create_user(ctx.db(), "owner").await;
    let collaborator = create_user(ctx.db(), "collaborator").await;
    let stranger = create_user(ctx.db(), "stranger").await;
    let song_id = create_song(ctx.db(), "Fix You").await;
    let owner_auth = bearer(&ctx, &owner);
    let collaborator_auth = bearer(&ctx, &collaborator);
    let stranger_auth = bearer(&ctx, &stranger);

    let response = send(
        &app,
        json_request("POST", "/api/playlists", Some(owner_auth.as_str()), json!({ "name": "Road Trip" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let playlist_id = body_json(response).await["data"]["playlistId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/collaborations",
            Some(owner_auth.as_str()),
            json!({ "playlistId": playlist_id, "userId": collaborator.as_str() }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let songs_uri = format!("/api/playlists/{}/songs", playlist_id);

    let response = send(
        &app,
        json_request("POST", &songs_uri, Some(collaborator_auth.as_str()), json!({ "songId": song_id.as_str() })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        json_request("POST", &songs_uri, Some(stranger_auth.as_str()), json!({ "songId": song_id.as_str() })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "You are not authorized to access this resource"
    );

    let response = send(
        &app,
        json_request("POST", &songs_uri, Some(owner_auth.as_str()), json!({ "songId": "song-missing" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, empty_request("GET", &songs_uri, Some(owner_auth.as_str()))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["playlist"]["username"], "owner");
    assert_eq!(body["data"]["playlist"]["songs"][0]["title"], "Fix You");

    let response = send(
        &app,
        json_request("DELETE", &songs_uri, Some(owner_auth.as_str()), json!({ "songId": song_id.as_str() })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let activities_uri = format!("/api/playlists/{}/activities", playlist_id);
    let response = send(&app, empty_request("GET", &activities_uri, Some(collaborator_auth.as_str()))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["playlistId"], playlist_id.as_str());
    let activities = body["data"]["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0]["username"], "collaborator");
    assert_eq!(activities[0]["action"], "add");
    assert_eq!(activities[1]["username"], "owner");
    assert_eq!(activities[1]["action"], "delete");

    let response = send(
        &app,
        empty_request("GET", "/api/playlists/playlist-missing/activities", Some(owner_auth.as_str())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        empty_request("DELETE", &format!("/api/playlists/{}", playlist_id), Some(collaborator_auth.as_str())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, empty_request("GET", "/api/playlists", Some(collaborator_auth.as_str()))).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["playlists"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_album_likes_report_data_source() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());
    let fan = create_user(ctx.db(), "fan").await;
    let album_id = create_album(ctx.db(), "Parachutes").await;
    let fan_auth = bearer(&ctx, &fan);
    let likes_uri = format!("/api/albums/{}/likes", album_id);

    let response = send(&app, empty_request("POST", &likes_uri, Some(fan_auth.as_str()))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, empty_request("POST", &likes_uri, Some(fan_auth.as_str()))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, empty_request("GET", &likes_uri, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("X-Data-Source").is_none());
    assert_eq!(body_json(response).await["data"]["likes"], 1);

    let response = send(&app, empty_request("GET", &likes_uri, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["X-Data-Source"], "cache");
    assert_eq!(body_json(response).await["data"]["likes"], 1);

    let response = send(&app, empty_request("DELETE", &likes_uri, Some(fan_auth.as_str()))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request("GET", &likes_uri, None)).await;
    assert!(response.headers().get("X-Data-Source").is_none());
    assert_eq!(body_json(response).await["data"]["likes"], 0);

    let response = send(
        &app,
        empty_request("POST", "/api/albums/album-missing/likes", Some(fan_auth.as_str())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_album_and_song_catalog() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());

    let response = send(
        &app,
        json_request("POST", "/api/albums", None, json!({ "name": "Viva la Vida", "year": 2008 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let album_id = body_json(response).await["data"]["albumId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &app,
        json_request("POST", "/api/albums", None, json!({ "name": "Too Old", "year": 1850 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/songs",
            None,
            json!({
                "title": "Lovers in Japan",
                "year": 2008,
                "genre": "Rock",
                "performer": "Coldplay",
                "duration": 411,
                "albumId": album_id,
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let song_id = body_json(response).await["data"]["songId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(&app, empty_request("GET", &format!("/api/albums/{}", album_id), None)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["album"]["name"], "Viva la Vida");
    assert_eq!(body["data"]["album"]["songs"][0]["id"], song_id.as_str());

    let response = send(&app, empty_request("GET", "/api/songs?performer=cold", None)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["songs"].as_array().unwrap().len(), 1);

    let response = send(&app, empty_request("GET", &format!("/api/songs/{}", song_id), None)).await;
    assert_eq!(body_json(response).await["data"]["song"]["albumId"], album_id.as_str());

    let response = send(&app, empty_request("DELETE", &format!("/api/albums/{}", album_id), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request("GET", &format!("/api/albums/{}", album_id), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["status"], "fail");
}

#[tokio::test]
async fn test_export_endpoint() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());
    let owner = create_user(ctx.db(), "owner").await;
    let collaborator = create_user(ctx.db(), "collaborator").await;
    let playlist_id = create_playlist(&ctx.state, "To Export", &owner).await;
    ctx.state
        .collaborations
        .add(&playlist_id, &collaborator)
        .await
        .unwrap();
    let uri = format!("/api/export/playlists/{}", playlist_id);

    let response = send(
        &app,
        json_request("POST", &uri, Some(bearer(&ctx, &owner).as_str()), json!({ "targetEmail": "not-an-email" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request(
            "POST",
            &uri,
            Some(bearer(&ctx, &owner).as_str()),
            json!({ "targetEmail": "owner@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["message"], "Your request is in the queue");

    let response = send(
        &app,
        json_request(
            "POST",
            &uri,
            Some(bearer(&ctx, &collaborator).as_str()),
            json!({ "targetEmail": "collab@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(ctx.queue.len(EXPORT_TOPIC).await, 1);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let ctx = create_test_context().await;
    let app = create_router(ctx.state.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/api/albums")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = send(&app, request).await;
    assert!(response.status().is_client_error());
}
