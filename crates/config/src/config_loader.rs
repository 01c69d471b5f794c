use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use app_error::{AppError, AppResult};

/// Complete application configuration loaded from the embedded JSON file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub database: SurrealDbConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SurrealDbConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub pool: DbPoolConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DbPoolConfig {
    pub size: usize,
    pub connection_timeout: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SecurityConfig {
    pub jwt: JwtSettings,
    pub cors: CorsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expiry_hours: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl AppConfig {
    /// Load configuration from the embedded file, apply environment
    /// overrides and validate the result.
    pub fn load() -> AppResult<Self> {
        let config_content =
            std::str::from_utf8(include_bytes!("../res/app-config.json")).unwrap_or("{}");

        let mut config = match serde_json::from_str::<AppConfig>(config_content) {
            Ok(conf) => {
                info!("Loaded configuration for environment: {}", conf.environment);
                conf
            }
            Err(e) => {
                warn!(
                    "Failed to load config file: {}. Using default configuration.",
                    e
                );
                Self::default()
            }
        };

        // The signing secret may come from a secret store via the
        // environment rather than the committed file.
        if let Ok(secret) = std::env::var("APP_JWT_SECRET") {
            if !secret.trim().is_empty() {
                config.security.jwt.secret = secret;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        let is_production = self.environment == "production";

        // Database validation
        if self.database.endpoint.trim().is_empty() {
            errors.push("Database endpoint cannot be empty".to_string());
        } else if is_production
            && !self.database.endpoint.starts_with("wss://")
            && !self.database.endpoint.contains("memory")
        {
            errors.push("Production should use a secure 'wss://' database connection".to_string());
        }

        if self.database.namespace.trim().is_empty() {
            errors.push("Database namespace cannot be empty".to_string());
        }

        if self.database.database.trim().is_empty() {
            errors.push("Database name cannot be empty".to_string());
        }

        if is_production && self.database.username == "root" {
            errors.push("Using the default 'root' database username in production is insecure".to_string());
        }

        if is_production && self.database.password == "root" {
            errors.push("Using the default 'root' database password in production is insecure".to_string());
        }

        // Server validation
        if self.server.host.trim().is_empty() {
            errors.push("Server host cannot be empty".to_string());
        }

        if self.server.port == 0 {
            errors.push("Server port cannot be 0".to_string());
        }

        // Security validation
        if is_production
            && (self.security.jwt.secret.len() < 32
                || self.security.jwt.secret.starts_with("default-insecure"))
        {
            errors.push("JWT secret is not secure for production use".to_string());
        }

        if self.security.jwt.expiry_hours == 0 {
            errors.push("JWT expiry must be at least one hour".to_string());
        }

        if !errors.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Invalid configuration: {}",
                errors.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database: SurrealDbConfig {
                endpoint: "ws://localhost:8000".to_string(),
                username: "root".to_string(),
                password: "root".to_string(),
                namespace: "blogsite".to_string(),
                database: "blogsite".to_string(),
                pool: DbPoolConfig {
                    size: 5,
                    connection_timeout: 5000,
                },
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                body_limit: 1048576, // 1MB
            },
            security: SecurityConfig {
                jwt: JwtSettings {
                    secret: "default-insecure-jwt-secret-do-not-use-in-production".to_string(),
                    expiry_hours: 72,
                },
                cors: CorsConfig {
                    allowed_origins: vec!["*".to_string()],
                    allowed_methods: vec![
                        "GET".to_string(),
                        "POST".to_string(),
                        "PUT".to_string(),
                        "DELETE".to_string(),
                        "OPTIONS".to_string(),
                    ],
                    allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
                },
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}
