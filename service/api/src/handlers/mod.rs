pub mod auth;
pub mod blog;
pub mod user;

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

// Liveness probe
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
