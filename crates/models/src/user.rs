use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};

use crate::blog::{Blog, BlogView};
use crate::record_number;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(default = "User::generate_id")]
    pub id: Thing,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    // Helper to generate a new numeric record id
    fn generate_id() -> Thing {
        let key = rand::rng().random_range(1..i64::MAX);
        Thing::from(("users".to_string(), Id::Number(key)))
    }

    // Create a new user; `password` is the already-hashed value
    pub fn new(username: String, email: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            username,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// The numeric identifier this user is known by externally
    pub fn numeric_id(&self) -> i64 {
        record_number(&self.id)
    }
}

/// Public view of a user. The password hash never leaves the storage layer.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// Convert User to UserProfile (hiding sensitive data)
impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.numeric_id(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// User profile together with the blogs the user owns
#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub blogs: Vec<BlogView>,
}

impl UserDetail {
    pub fn new(user: User, blogs: Vec<Blog>) -> Self {
        Self {
            id: user.numeric_id(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            blogs: blogs.into_iter().map(BlogView::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_hides_password_hash() {
        let user = User::new(
            "alicesmith".to_string(),
            "alice@example.com".to_string(),
            "$argon2id$fakehash".to_string(),
        );
        let profile = UserProfile::from(user.clone());

        assert_eq!(profile.username, "alicesmith");
        assert_eq!(profile.id, user.numeric_id());

        let json = serde_json::to_string(&profile).expect("profile should serialize");
        assert!(!json.contains("argon2id"), "hash must not appear in the profile");
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_generated_ids_are_positive_and_unique() {
        let a = User::new("usera0".into(), "a@example.com".into(), "h".into());
        let b = User::new("userb0".into(), "b@example.com".into(), "h".into());
        assert!(a.numeric_id() > 0);
        assert_ne!(a.numeric_id(), b.numeric_id());
    }
}
