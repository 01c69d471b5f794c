use crate::{handlers, service::BlogService};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use axum::{
    Router,
    extract::Extension,
    handler::Handler,
    routing::{get, post, put},
};

use app_authentication::{AuthService, AuthServiceTrait};
use app_config::AppConfig;
use app_error::middleware_handling::error_handling_middleware;
use app_middleware::{
    api_middleware::{logging_middleware, security_headers_middleware},
    require_auth,
};

pub fn create_routes(auth_service: Arc<AuthService>, blog_service: Arc<BlogService>) -> Router {
    // Load configuration
    let config = AppConfig::load().unwrap_or_default();

    // Get body limit and CORS settings from config
    let body_limit = config.server.body_limit;
    let cors_config = &config.security.cors;

    let jwt_service = auth_service.get_jwt_service();

    // Configure CORS with settings from config
    let cors = CorsLayer::new()
        // If allowed_origins contains "*", use Any, otherwise use exact list
        .allow_origin(
            if cors_config.allowed_origins.contains(&"*".to_string()) {
                tower_http::cors::AllowOrigin::any()
            } else {
                tower_http::cors::AllowOrigin::list(
                    cors_config
                        .allowed_origins
                        .iter()
                        .filter_map(|origin| origin.parse().ok())
                        .collect::<Vec<_>>(),
                )
            },
        )
        // Convert allowed methods from strings to HTTP methods
        .allow_methods(
            cors_config
                .allowed_methods
                .iter()
                .filter_map(|method| method.parse().ok())
                .collect::<Vec<_>>(),
        )
        // Convert allowed headers from strings to HTTP header names
        .allow_headers(
            cors_config
                .allowed_headers
                .iter()
                .filter_map(|header| header.parse().ok())
                .collect::<Vec<_>>(),
        );

    // Define global middleware stack WITHOUT the body limit
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors);

    // Routes that consume an authenticated identity; the gate rejects
    // requests without a valid bearer token before any handler runs
    let protected = Router::new()
        .route("/api/user/blog", post(handlers::blog::create_blog))
        .route("/api/user/blogs", get(handlers::blog::user_blogs))
        .route(
            "/api/user/blog/{id}",
            put(handlers::blog::update_blog).delete(handlers::blog::delete_blog),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&jwt_service),
            require_auth,
        ));

    // Public surface. Profile reads are public while profile updates are
    // not, so the update handler carries the gate itself.
    let public = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/feed", get(handlers::blog::feed))
        .route("/api/blog/{id}", get(handlers::blog::get_blog))
        .route(
            "/api/user/{id}",
            get(handlers::user::get_user).put(handlers::user::update_user.layer(
                axum::middleware::from_fn_with_state(Arc::clone(&jwt_service), require_auth),
            )),
        );

    let app = public.merge(protected);

    // Add Extensions
    let app = app
        .layer(Extension(Arc::clone(&auth_service)))
        .layer(Extension(Arc::clone(&blog_service)));

    // Apply middleware in order
    let app = app
        .layer(axum::middleware::from_fn(error_handling_middleware))
        .layer(RequestBodyLimitLayer::new(body_limit));

    // Apply custom middleware stacks
    let app = app
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware));

    // Apply global middleware stack
    app.layer(middleware_stack)
}
