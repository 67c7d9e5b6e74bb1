//! API route modules
//!
//! Every success body is `{"status":"success", "message"?, "data"?}`; errors
//! are rendered by [`crate::error::ServerError`].

pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod exports;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod users;
pub mod validation;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub type Created = (StatusCode, Json<Value>);

/// `{"status":"success","data":...}`
pub fn success(data: Value) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": data,
    }))
}

/// `{"status":"success","message":...}`
pub fn success_message(message: &str) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": message,
    }))
}

/// 201 with message and data
pub fn created(message: &str, data: Value) -> Created {
    (
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": message,
            "data": data,
        })),
    )
}

/// 201 with message only
pub fn created_message(message: &str) -> Created {
    (StatusCode::CREATED, success_message(message))
}
