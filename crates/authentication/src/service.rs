use app_database::service::DbService;
use app_error::{AppError, AppResult};
use app_models::user::{
    AuthResponse, LoginInput, RegisterInput, UpdateUserInput, User, UserProfile,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::{JwtService, password, validation};

/// Trait defining the authentication service interface
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    /// Register a new user
    async fn register(&self, input: RegisterInput) -> AppResult<UserProfile>;

    /// Login an existing user
    async fn login(&self, input: LoginInput) -> AppResult<AuthResponse>;

    /// Get a user by their numeric id
    async fn get_user_by_id(&self, user_id: i64) -> AppResult<User>;

    /// Update a user's profile fields
    async fn update_profile(&self, user_id: i64, input: UpdateUserInput) -> AppResult<UserProfile>;

    /// Get the JWT service
    fn get_jwt_service(&self) -> Arc<JwtService>;
}

/// Implementation of the authentication service
pub struct AuthService {
    jwt_service: Arc<JwtService>,
    user_db: Option<Arc<DbService<User>>>,
}

impl AuthService {
    /// Create a new authentication service with the given JWT secret
    pub fn new(jwt_secret: &[u8], expiry_hours: u64) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::new(jwt_secret, expiry_hours)),
            user_db: None,
        }
    }

    /// Add a database service to the authentication service
    pub fn with_db(mut self, user_db: Arc<DbService<User>>) -> Self {
        self.user_db = Some(user_db);
        self
    }

    fn user_db(&self) -> AppResult<&Arc<DbService<User>>> {
        self.user_db
            .as_ref()
            .ok_or_else(|| AppError::ServerError(anyhow::anyhow!("Database not available")))
    }

    // Helper method to check if a user with the given username or email exists
    async fn check_user_exists(&self, username: &str, email: &str) -> AppResult<()> {
        let user_db = self.user_db()?;

        let existing_users = user_db
            .get_records_by_field("username", username.to_string())
            .await
            .map_err(|e| {
                error!("Database error when checking for existing user: {}", e);
                e
            })?;

        if !existing_users.is_empty() {
            return Err(AppError::ValidationError(
                "Username already taken".to_string(),
            ));
        }

        let existing_emails = user_db
            .get_records_by_field("email", email.to_string())
            .await
            .map_err(|e| {
                error!("Database error when checking for existing email: {}", e);
                e
            })?;

        if !existing_emails.is_empty() {
            return Err(AppError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        Ok(())
    }

    // Helper method to get user by username. The error is identical to the
    // wrong-password one so responses don't reveal which check failed.
    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        let users = self
            .user_db()?
            .get_records_by_field("username", username.to_string())
            .await
            .map_err(|e| {
                error!("Database error when fetching user for login: {}", e);
                e
            })?;

        users
            .into_iter()
            .next()
            .ok_or_else(AppError::invalid_credentials)
    }

    // Helper method to create the login response
    fn create_auth_response(&self, user: &User) -> AppResult<AuthResponse> {
        let token = self.jwt_service.generate_token(user.numeric_id())?;

        Ok(AuthResponse {
            token,
            user: UserProfile::from(user.clone()),
        })
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    fn get_jwt_service(&self) -> Arc<JwtService> {
        Arc::clone(&self.jwt_service)
    }

    async fn register(&self, input: RegisterInput) -> AppResult<UserProfile> {
        // Sanitize and validate all inputs. The password is left untouched
        // as it may contain meaningful whitespace.
        let username = validation::sanitize_string(&input.username);
        let email = validation::sanitize_string(&input.email);
        let password = input.password;

        validation::validate_username(&username)?;
        validation::validate_email(&email)?;
        validation::validate_password(&password)?;

        // Check if user already exists
        self.check_user_exists(&username, &email).await?;

        // Hash password
        let hashed_password = password::hash_password(&password)?;

        // Create new user with sanitized inputs
        let user = User::new(username, email, hashed_password);

        info!("Storing new user in database: {}", user.username);

        let stored_user = match self.user_db()?.create_record(user.clone()).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                error!("Database did not return stored user");
                user
            }
            Err(e) => {
                error!("Failed to store user in database: {}", e);
                return Err(e);
            }
        };

        Ok(UserProfile::from(stored_user))
    }

    async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        let username = validation::sanitize_string(&input.username);
        let password = input.password;

        if username.is_empty() {
            return Err(AppError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }

        if password.is_empty() {
            return Err(AppError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        let user = self.get_user_by_username(&username).await?;

        // Verify password; a wrong password produces the same message as an
        // unknown username
        let is_valid = password::verify_password(&user.password, &password)?;
        if !is_valid {
            return Err(AppError::invalid_credentials());
        }

        self.create_auth_response(&user)
    }

    async fn get_user_by_id(&self, user_id: i64) -> AppResult<User> {
        self.user_db()?
            .get_record_by_id(user_id)
            .await
            .map_err(|e| {
                error!("Database error when fetching user by ID: {}", e);
                e
            })?
            .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))
    }

    async fn update_profile(&self, user_id: i64, input: UpdateUserInput) -> AppResult<UserProfile> {
        let username = validation::sanitize_string(&input.username);
        let email = validation::sanitize_string(&input.email);

        validation::validate_username(&username)?;
        validation::validate_email(&email)?;

        let mut user = self.get_user_by_id(user_id).await?;

        user.username = username;
        user.email = email;
        user.updated_at = chrono::Utc::now();

        let updated = self
            .user_db()?
            .update_record(user_id, user)
            .await?
            .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;

        Ok(UserProfile::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_database::db_connect::initialize_memory_db;

    async fn test_service() -> AuthService {
        let db = initialize_memory_db()
            .await
            .expect("memory database should start");
        let user_db = Arc::new(DbService::<User>::new(db, "users"));
        AuthService::new(b"test_jwt_secret_for_auth_service", 72).with_db(user_db)
    }

    fn register_input(username: &str, email: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_string(),
            email: email.to_string(),
            password: "Password1!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_roundtrip() {
        let service = test_service().await;

        let profile = service
            .register(register_input("carolsmith", "carol@example.com"))
            .await
            .expect("registration should succeed");
        assert_eq!(profile.username, "carolsmith");

        let response = service
            .login(LoginInput {
                username: "carolsmith".to_string(),
                password: "Password1!".to_string(),
            })
            .await
            .expect("login should succeed");

        // The token must verify back to the registered user's id
        let claims = service
            .get_jwt_service()
            .validate_token(&response.token)
            .expect("issued token should validate");
        assert_eq!(claims.sub, profile.id.to_string());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let service = test_service().await;

        service
            .register(register_input("daveadams", "dave@example.com"))
            .await
            .expect("first registration should succeed");

        let result = service
            .register(register_input("daveadams", "dave2@example.com"))
            .await;

        match result {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("Username already taken"));
            }
            other => panic!("expected a validation error, got ok={}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let service = test_service().await;

        let result = service
            .register(RegisterInput {
                username: "frankmiller".to_string(),
                email: "frank@example.com".to_string(),
                password: "abc".to_string(),
            })
            .await;

        match result {
            Err(AppError::ValidationError(msg)) => {
                assert!(
                    msg.contains("at least 8 characters"),
                    "length rule must be reported first, got: {}",
                    msg
                );
            }
            other => panic!("expected a validation error, got ok={}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let service = test_service().await;

        service
            .register(register_input("gretagreen", "greta@example.com"))
            .await
            .expect("registration should succeed");

        let unknown_user = service
            .login(LoginInput {
                username: "nosuchuser1".to_string(),
                password: "Password1!".to_string(),
            })
            .await;
        let wrong_password = service
            .login(LoginInput {
                username: "gretagreen".to_string(),
                password: "WrongPass1!".to_string(),
            })
            .await;

        let msg_a = match unknown_user {
            Err(AppError::AuthenticationError(m)) => m,
            other => panic!("expected auth error, got ok={}", other.is_ok()),
        };
        let msg_b = match wrong_password {
            Err(AppError::AuthenticationError(m)) => m,
            other => panic!("expected auth error, got ok={}", other.is_ok()),
        };
        assert_eq!(msg_a, msg_b, "responses must not reveal which check failed");
    }

    #[tokio::test]
    async fn test_update_profile_validates_and_persists() {
        let service = test_service().await;

        let profile = service
            .register(register_input("henryford", "henry@example.com"))
            .await
            .expect("registration should succeed");

        let bad = service
            .update_profile(
                profile.id,
                UpdateUserInput {
                    username: "h!".to_string(),
                    email: "henry@example.com".to_string(),
                },
            )
            .await;
        assert!(bad.is_err(), "invalid username must be rejected");

        let updated = service
            .update_profile(
                profile.id,
                UpdateUserInput {
                    username: "henryford2".to_string(),
                    email: "henry2@example.com".to_string(),
                },
            )
            .await
            .expect("valid update should succeed");
        assert_eq!(updated.username, "henryford2");
        assert_eq!(updated.email, "henry2@example.com");

        let fetched = service.get_user_by_id(profile.id).await.unwrap();
        assert_eq!(fetched.email, "henry2@example.com");
    }
}
