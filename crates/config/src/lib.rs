use app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

mod config_loader;
pub use config_loader::*;

/// The configuration system uses a JSON configuration file embedded at
/// build time, with a `Default` fallback when the file cannot be parsed.
///
/// The JWT signing secret can additionally be overridden through the
/// `APP_JWT_SECRET` environment variable so deployments can source it from
/// a secret store instead of the committed configuration file.

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Vec<u8>,
    pub expiry_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: &[u8], expiry_hours: u64) -> Self {
        Self {
            secret: secret.to_vec(),
            expiry_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub port: u16,
    pub address: String,
}

impl Server {
    pub fn new(address: String, port: u16) -> Self {
        Self { port, address }
    }

    // Validate server configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Invalid server port: '0' is not a valid port number"
            )));
        }

        if self.address.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Server address cannot be empty"
            )));
        }

        Ok(())
    }
}

/// Converts from the full AppConfig to the server binding config
impl From<&AppConfig> for Server {
    fn from(config: &AppConfig) -> Self {
        Self {
            port: config.server.port,
            address: config.server.host.clone(),
        }
    }
}

/// Converts from the full AppConfig to the JWT signing config
impl From<&AppConfig> for JwtConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            secret: config.security.jwt.secret.clone().into_bytes(),
            expiry_hours: config.security.jwt.expiry_hours,
        }
    }
}
