use crate::service::BlogService;
use app_authentication::{AuthService, AuthServiceTrait};
use app_error::{AppResult, not_found_error};
use app_middleware::AuthenticatedUser;
use app_models::user::{UpdateUserInput, UserDetail};
use axum::{Extension, Json, extract::Path};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

fn parse_user_id(raw: &str) -> AppResult<i64> {
    match raw.parse() {
        Ok(id) => Ok(id),
        Err(_) => not_found_error!("User", raw),
    }
}

/// Public profile: user fields plus the blogs the user owns
pub async fn get_user(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(blog_service): Extension<Arc<BlogService>>,
    Path(id): Path<String>,
) -> AppResult<Json<UserDetail>> {
    let user_id = parse_user_id(&id)?;

    let user = auth_service.get_user_by_id(user_id).await?;
    let blogs = blog_service.blogs_for_user(user_id).await?;

    Ok(Json(UserDetail::new(user, blogs)))
}

pub async fn update_user(
    Extension(auth_service): Extension<Arc<AuthService>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<Value>> {
    debug!("UpdateUser {} requested by user {}", id, user.id);

    let user_id = parse_user_id(&id)?;
    auth_service.update_profile(user_id, input).await?;

    Ok(Json(json!({ "message": "User successfully updated" })))
}
