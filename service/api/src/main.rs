use anyhow::Context;
use blog_api::{routes, service::BlogService};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app_authentication::AuthService;
use app_config::{AppConfig, JwtConfig, Server};
use app_database::{db_connect::initialize_db, service::DbService};
use app_error::AppError;
use app_models::{blog::Blog, user::User};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration first; the log filter default comes from it
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting application at {}", chrono::Utc::now());

    let server_config = Server::from(&config);
    let jwt_config = JwtConfig::from(&config);

    // Initialize the database connection pool and schema
    let db = initialize_db(&config).await?;

    let user_db = Arc::new(DbService::<User>::new(Arc::clone(&db), "users"));
    let blog_db = Arc::new(DbService::<Blog>::new(Arc::clone(&db), "blogs"));

    let auth_service = Arc::new(
        AuthService::new(&jwt_config.secret, jwt_config.expiry_hours).with_db(user_db),
    );
    let blog_service = Arc::new(BlogService::new(blog_db));

    // Configure application routes
    let app = routes::create_routes(auth_service, blog_service);

    // Bind server to address and start it
    let address = format!("{}:{}", server_config.address, server_config.port);
    let listener = TcpListener::bind(&address)
        .await
        .context(format!("Failed to bind to address: {}", address))?;

    info!("Server running on {}", address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
