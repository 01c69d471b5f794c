use app_config::AppConfig;
use app_error::AppResult;
use std::sync::Arc;

use crate::{Database, service::DbCredentials};

/// Connect to the configured SurrealDB endpoint and prepare the schema.
pub async fn initialize_db(config: &AppConfig) -> AppResult<Arc<Database>> {
    let db_config = &config.database;
    tracing::debug!("Connecting to SurrealDB: {}", db_config.endpoint);

    // Check if using secure connection
    let is_secure = db_config.endpoint.starts_with("wss://");

    if is_secure {
        tracing::info!("Using secure TLS connection to database");
    } else if !db_config.endpoint.contains("memory") {
        tracing::warn!("Using non-secure database connection");
    }

    let max_connections = db_config.pool.size;

    tracing::info!(
        "Initializing database connection pool with {} connections",
        max_connections
    );

    let credentials = DbCredentials::new(db_config.username.clone(), db_config.password.clone());

    let db = Database::initialize(
        &db_config.endpoint,
        max_connections,
        &db_config.namespace,
        &db_config.database,
        &credentials,
    )
    .await?;

    define_schema(&db).await?;

    tracing::info!("Successfully connected to SurrealDB with connection pool");

    Ok(Arc::new(db))
}

/// In-memory database, used by the test suites.
pub async fn initialize_memory_db() -> AppResult<Arc<Database>> {
    let db = Database::initialize_memory(10, "blogsite", "blogsite").await?;

    define_schema(&db).await?;

    tracing::info!("Successfully connected to in-memory SurrealDB with connection pool");

    Ok(Arc::new(db))
}

/// Index definitions. The unique indexes on username/email back the
/// duplicate checks done at registration time.
pub async fn define_schema(db: &Database) -> AppResult<()> {
    const STATEMENTS: [&str; 3] = [
        "DEFINE INDEX IF NOT EXISTS idx_users_username ON TABLE users COLUMNS username UNIQUE",
        "DEFINE INDEX IF NOT EXISTS idx_users_email ON TABLE users COLUMNS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS idx_blogs_owner ON TABLE blogs COLUMNS user_id",
    ];

    for statement in STATEMENTS {
        db.query(statement).r#await().await?;
    }

    Ok(())
}
