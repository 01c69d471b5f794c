use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::{net::IpAddr, str::FromStr};
use tracing::{error, info, warn};

// Get client IP from various headers or connection info
pub fn get_client_ip(req: &Request<Body>) -> Option<IpAddr> {
    // Try X-Forwarded-For header first (common for proxies)
    if let Some(forward) = req.headers().get("X-Forwarded-For") {
        if let Ok(forward_str) = forward.to_str() {
            if let Some(ip) = forward_str.split(',').next() {
                if let Ok(ip_addr) = IpAddr::from_str(ip.trim()) {
                    return Some(ip_addr);
                }
            }
        }
    }

    // Try X-Real-IP header (used by some proxies)
    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(real_ip_str) = real_ip.to_str() {
            if let Ok(ip_addr) = IpAddr::from_str(real_ip_str.trim()) {
                return Some(ip_addr);
            }
        }
    }

    // Try to get the peer address from the connection
    req.extensions()
        .get::<axum::extract::connect_info::ConnectInfo<std::net::SocketAddr>>()
        .map(|connect_info| connect_info.ip())
}

// Extract client identifier from request
pub fn extract_client_id(req: &Request<Body>) -> String {
    if let Some(ip) = get_client_ip(req) {
        return ip.to_string();
    }

    "unknown".to_string()
}

// Security headers middleware
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "X-XSS-Protection",
        HeaderValue::from_static("1; mode=block"),
    );

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

// Logging middleware with performance tracking
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    use std::time::Instant;

    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let client_id = extract_client_id(&req);

    // Log request start
    info!(
        method = %method,
        path = %path,
        client = %client_id,
        "Request started"
    );

    // Process the request
    let response = next.run(req).await;

    // Calculate request duration
    let duration = start.elapsed();
    let status = response.status().as_u16();

    // Log request completion with appropriate level based on status
    if status < 400 {
        info!(
            method = %method,
            path = %path,
            client = %client_id,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    } else if status < 500 {
        warn!(
            method = %method,
            path = %path,
            client = %client_id,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed with client error"
        );
    } else {
        error!(
            method = %method,
            path = %path,
            client = %client_id,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed with server error"
        );
    }

    response
}
