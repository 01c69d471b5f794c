use app_authentication::JwtService;
use app_error::{AppError, AppResult};
use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// The identity attached to a request once its token has been verified.
/// Handlers take this as a parameter, so a route that forgot the gate
/// fails with 401 instead of running unauthenticated.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: i64,
}

/// Token-verification gate for protected routes.
///
/// Requests without an `Authorization: Bearer <token>` header, or with a
/// token that does not verify, are rejected with 401 before any handler
/// runs. On success the authenticated user id is inserted into the request
/// extensions. The gate only talks to the token service, never to storage.
pub async fn require_auth(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::missing_token)?;

    let auth_str = auth_header.to_str().map_err(|_| {
        warn!("Authorization header is not valid UTF-8");
        AppError::token_invalid()
    })?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header without Bearer prefix");
        AppError::token_invalid()
    })?;

    let claims = jwt_service.validate_token(token)?;

    let user_id: i64 = claims.sub.parse().map_err(|_| {
        warn!("Token subject is not a numeric user id");
        AppError::token_invalid()
    })?;

    debug!("Authenticated request for user {}", user_id);
    req.extensions_mut().insert(AuthenticatedUser { id: user_id });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(AppError::missing_token)
    }
}
