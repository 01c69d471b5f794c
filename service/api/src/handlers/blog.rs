use crate::service::BlogService;
use app_error::AppResult;
use app_middleware::AuthenticatedUser;
use app_models::blog::{BlogInput, BlogView, UpdateBlogInput};
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

pub async fn create_blog(
    Extension(blog_service): Extension<Arc<BlogService>>,
    user: AuthenticatedUser,
    Json(input): Json<BlogInput>,
) -> AppResult<(StatusCode, Json<BlogView>)> {
    debug!("CreateBlog for user {}", user.id);

    let blog = blog_service.create(user.id, input).await?;
    Ok((StatusCode::CREATED, Json(BlogView::from(blog))))
}

pub async fn feed(
    Extension(blog_service): Extension<Arc<BlogService>>,
) -> AppResult<Json<Vec<BlogView>>> {
    let blogs = blog_service.feed().await?;
    Ok(Json(blogs.into_iter().map(BlogView::from).collect()))
}

pub async fn user_blogs(
    Extension(blog_service): Extension<Arc<BlogService>>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<BlogView>>> {
    debug!("GetUserBlogs for user {}", user.id);

    let blogs = blog_service.blogs_for_user(user.id).await?;
    Ok(Json(blogs.into_iter().map(BlogView::from).collect()))
}

pub async fn get_blog(
    Extension(blog_service): Extension<Arc<BlogService>>,
    Path(id): Path<String>,
) -> AppResult<Json<BlogView>> {
    let blog = blog_service.get(&id).await?;
    Ok(Json(BlogView::from(blog)))
}

pub async fn update_blog(
    Extension(blog_service): Extension<Arc<BlogService>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateBlogInput>,
) -> AppResult<Json<BlogView>> {
    debug!("UpdateBlog {} for user {}", id, user.id);

    let blog = blog_service.update_owned(&id, user.id, input).await?;
    Ok(Json(BlogView::from(blog)))
}

pub async fn delete_blog(
    Extension(blog_service): Extension<Arc<BlogService>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    debug!("DeleteBlog {} for user {}", id, user.id);

    blog_service.delete_owned(&id, user.id).await?;
    Ok(Json(json!({ "message": "Blog successfully deleted" })))
}
