use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};

use crate::record_number;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Blog {
    #[serde(default = "Blog::generate_id")]
    pub id: Thing,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Numeric id of the owning user. A back-reference for authorization
    /// lookups, not a record link.
    pub user_id: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    fn generate_id() -> Thing {
        let key = rand::rng().random_range(1..i64::MAX);
        Thing::from(("blogs".to_string(), Id::Number(key)))
    }

    pub fn new(input: BlogInput, owner: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            title: input.title,
            description: input.description,
            completed: input.completed,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn numeric_id(&self) -> i64 {
        record_number(&self.id)
    }
}

#[derive(Debug, Deserialize)]
pub struct BlogInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Deserialize)]
pub struct UpdateBlogInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogView {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.numeric_id(),
            title: blog.title,
            description: blog.description,
            completed: blog.completed,
            user_id: blog.user_id,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}
