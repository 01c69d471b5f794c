use app_database::service::DbService;
use app_error::{AppError, AppResult, not_found_error};
use app_models::blog::{Blog, BlogInput, UpdateBlogInput};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Blog CRUD over the `blogs` table. Mutations are scoped to the owning
/// user: the ownership predicate is part of the write statement itself, so
/// the read-check and the write cannot interleave with a concurrent
/// ownership change.
pub struct BlogService {
    blog_db: Arc<DbService<Blog>>,
}

impl BlogService {
    pub fn new(blog_db: Arc<DbService<Blog>>) -> Self {
        Self { blog_db }
    }

    fn parse_id(raw: &str) -> AppResult<i64> {
        match raw.parse() {
            Ok(id) => Ok(id),
            Err(_) => not_found_error!("Blog", raw),
        }
    }

    pub async fn create(&self, owner: i64, input: BlogInput) -> AppResult<Blog> {
        let blog = Blog::new(input, owner);
        info!("Creating blog '{}' for user {}", blog.title, owner);

        match self.blog_db.create_record(blog.clone()).await {
            Ok(Some(stored)) => Ok(stored),
            Ok(None) => {
                error!("Database did not return stored blog");
                Ok(blog)
            }
            Err(e) => {
                error!("Failed to store blog: {}", e);
                Err(e)
            }
        }
    }

    /// Every blog, newest first. The public feed.
    pub async fn feed(&self) -> AppResult<Vec<Blog>> {
        self.blog_db
            .run_custom_query("SELECT * FROM blogs ORDER BY created_at DESC", vec![])
            .await
    }

    pub async fn blogs_for_user(&self, owner: i64) -> AppResult<Vec<Blog>> {
        self.blog_db.get_records_by_field("user_id", owner).await
    }

    pub async fn get(&self, raw_id: &str) -> AppResult<Blog> {
        let id = Self::parse_id(raw_id)?;
        match self.blog_db.get_record_by_id(id).await? {
            Some(blog) => Ok(blog),
            None => not_found_error!("Blog", raw_id),
        }
    }

    pub async fn update_owned(
        &self,
        raw_id: &str,
        owner: i64,
        input: UpdateBlogInput,
    ) -> AppResult<Blog> {
        let existing = self.get(raw_id).await?;

        if existing.user_id != owner {
            warn!(
                "User {} attempted to update blog {} owned by {}",
                owner, raw_id, existing.user_id
            );
            return Err(AppError::not_owner());
        }

        let blog_id = existing.numeric_id();

        // Absent fields keep their stored value
        let title = input.title.unwrap_or(existing.title);
        let description = input.description.unwrap_or(existing.description);
        let completed = input.completed.unwrap_or(existing.completed);

        let updated = self
            .blog_db
            .run_custom_query(
                "UPDATE type::thing('blogs', $id) SET title = $title, description = $description, completed = $completed, updated_at = $updated_at WHERE user_id = $owner RETURN AFTER",
                vec![
                    ("id".to_string(), json!(blog_id)),
                    ("title".to_string(), json!(title)),
                    ("description".to_string(), json!(description)),
                    ("completed".to_string(), json!(completed)),
                    ("updated_at".to_string(), json!(Utc::now())),
                    ("owner".to_string(), json!(owner)),
                ],
            )
            .await?;

        // An empty result means the ownership predicate did not match at
        // write time (the record changed hands since the check)
        updated.into_iter().next().ok_or_else(AppError::not_owner)
    }

    pub async fn delete_owned(&self, raw_id: &str, owner: i64) -> AppResult<Blog> {
        let existing = self.get(raw_id).await?;

        if existing.user_id != owner {
            warn!(
                "User {} attempted to delete blog {} owned by {}",
                owner, raw_id, existing.user_id
            );
            return Err(AppError::not_owner());
        }

        let deleted = self
            .blog_db
            .run_custom_query(
                "DELETE type::thing('blogs', $id) WHERE user_id = $owner RETURN BEFORE",
                vec![
                    ("id".to_string(), json!(existing.numeric_id())),
                    ("owner".to_string(), json!(owner)),
                ],
            )
            .await?;

        deleted.into_iter().next().ok_or_else(AppError::not_owner)
    }
}
