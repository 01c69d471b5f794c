use app_error::{AppError, AppResult};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::error;

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// The plaintext never appears in logs or error messages; a hashing
/// failure is an internal error, distinct from bad credentials.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            AppError::ServerError(anyhow::anyhow!("Failed to hash password: {}", e))
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored hash. The comparison is
/// constant-time inside the argon2 crate.
pub fn verify_password(password_hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| {
        error!("Invalid password hash: {}", e);
        AppError::ServerError(anyhow::anyhow!("Invalid password hash: {}", e))
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
