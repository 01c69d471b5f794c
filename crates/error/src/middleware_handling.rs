use axum::{
    body::Body,
    http::{Request, Response, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;
use tracing::{error, info};

use crate::{AppError, ErrorResponse};

pub async fn error_handling_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let start = Instant::now();
    let path = req.uri().path().to_owned();
    let method = req.method().clone();

    // Process the request
    let response = next.run(req).await;

    // Log request completion time
    let latency = start.elapsed();
    info!(
        "Request completed: {} {} - Status: {} - Time: {:?}",
        method,
        path,
        response.status(),
        latency
    );

    // Handle specific error conditions
    let status = response.status();

    if status == StatusCode::PAYLOAD_TOO_LARGE {
        error!("Request body too large: {}", status);

        let error_response = ErrorResponse {
            status: status.to_string(),
            message: "The request body exceeds the maximum allowed size".to_string(),
            code: "PAYLOAD_TOO_LARGE".to_string(),
            details: Some("Please reduce the size of your request and try again".to_string()),
            help: None,
        };

        return Ok(Response::builder()
            .status(StatusCode::PAYLOAD_TOO_LARGE)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&error_response).unwrap_or_default()))
            .unwrap_or_else(|_| StatusCode::PAYLOAD_TOO_LARGE.into_response()))
    }

    // If everything is fine, just return the original response
    Ok(response)
}
