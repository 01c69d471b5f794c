use app_error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject: the user's numeric id, encoded as a string
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Issues and verifies the HS256 identity tokens. The signing secret is
/// injected once at construction and never changes for the lifetime of
/// the process.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: u64,
}

impl JwtService {
    pub fn new(secret: &[u8], expiry_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_hours,
        }
    }

    pub fn generate_token(&self, user_id: i64) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiry_hours as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::ServerError(anyhow::anyhow!("Failed to generate token: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::token_expired(),
                    _ => AppError::token_invalid(),
                }
            })?;

        debug!("Token validated for user {}", token_data.claims.sub);
        Ok(token_data.claims)
    }
}
