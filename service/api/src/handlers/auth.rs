use app_authentication::{AuthService, AuthServiceTrait};
use app_error::AppResult;
use app_models::user::{AuthResponse, LoginInput, RegisterInput};
use axum::{Extension, Json, http::StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

pub async fn register(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let profile = auth_service.register(input).await?;
    info!("Registered user {}", profile.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User successfully registered" })),
    ))
}

pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    let response = auth_service.login(input).await?;
    Ok(Json(response))
}
