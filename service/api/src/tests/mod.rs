use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{routes::create_routes, service::BlogService};
use app_authentication::AuthService;
use app_database::{db_connect::initialize_memory_db, service::DbService};
use app_models::{blog::Blog, user::User};

// Every test gets its own in-memory database, so state never leaks
// between tests.
async fn setup_test_app() -> Router {
    let db = initialize_memory_db()
        .await
        .expect("memory database should start");

    let user_db = Arc::new(DbService::<User>::new(Arc::clone(&db), "users"));
    let blog_db = Arc::new(DbService::<Blog>::new(Arc::clone(&db), "blogs"));

    let auth_service =
        Arc::new(AuthService::new(b"route_test_jwt_secret", 72).with_db(user_db));
    let blog_service = Arc::new(BlogService::new(blog_db));

    create_routes(auth_service, blog_service)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}));

    (status, body)
}

async fn register_and_login(app: &Router, username: &str, email: &str) -> String {
    let (status, _) = send_json(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": "Password1!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration should succeed");

    let (status, body) = send_json(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({
            "username": username,
            "password": "Password1!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login should succeed");

    body["token"]
        .as_str()
        .expect("login should return a token")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let (status, _) = send_json(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": "abc",
            "email": "abc@example.com",
            "password": "Password1!"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(
        message.contains("at least 6 characters"),
        "unexpected message: {}",
        message
    );
}

#[tokio::test]
async fn test_register_reports_password_length_rule_first() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": "validname",
            "email": "valid@example.com",
            "password": "abc"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(
        message.contains("at least 8 characters"),
        "length rule should be reported before the other rules, got: {}",
        message
    );
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let app = setup_test_app().await;

    register_and_login(&app, "dupuser1", "dup1@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": "dupuser1",
            "email": "other@example.com",
            "password": "Password1!"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("already taken"), "got: {}", message);
}

#[tokio::test]
async fn test_login_requires_password() {
    let app = setup_test_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "someuser" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_unauthorized() {
    let app = setup_test_app().await;

    register_and_login(&app, "loginuser", "login@example.com").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({
            "username": "loginuser",
            "password": "WrongPass1!"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_reject_unauthenticated_requests() {
    let app = setup_test_app().await;

    // No Authorization header
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/user/blog",
        None,
        Some(json!({ "title": "t", "description": "d" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(&app, "GET", "/api/user/blogs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage bearer token
    let (status, _) = send_json(&app, "GET", "/api/user/blogs", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blog_roundtrip_create_then_public_read() {
    let app = setup_test_app().await;
    let token = register_and_login(&app, "writeruser", "writer@example.com").await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token),
        Some(json!({
            "title": "My first post",
            "description": "Some words",
            "completed": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let blog_id = created["id"].as_i64().expect("created blog should have a numeric id");

    // Read it back without any Authorization header: public by design
    let (status, fetched) =
        send_json(&app, "GET", &format!("/api/blog/{}", blog_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], created["title"]);
    assert_eq!(fetched["description"], created["description"]);
    assert_eq!(fetched["completed"], created["completed"]);
}

#[tokio::test]
async fn test_feed_is_public() {
    let app = setup_test_app().await;
    let token = register_and_login(&app, "feeduser1", "feed@example.com").await;

    send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token),
        Some(json!({ "title": "Feed post", "description": "visible to all" })),
    )
    .await;

    let (status, body) = send_json(&app, "GET", "/api/feed", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let posts = body.as_array().expect("feed should be an array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Feed post");
}

#[tokio::test]
async fn test_unknown_blog_is_not_found() {
    let app = setup_test_app().await;

    let (status, _) = send_json(&app, "GET", "/api/blog/999999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A non-numeric id is also just an absent resource
    let (status, _) = send_json(&app, "GET", "/api/blog/nonsense", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mutating_another_users_blog_is_unauthorized() {
    let app = setup_test_app().await;

    let owner_token = register_and_login(&app, "owneruser", "owner@example.com").await;
    let other_token = register_and_login(&app, "otheruser", "other@example.com").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&owner_token),
        Some(json!({ "title": "Owned", "description": "mine" })),
    )
    .await;
    let blog_id = created["id"].as_i64().unwrap();

    // A perfectly valid token that belongs to the wrong user
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/user/blog/{}", blog_id),
        Some(&other_token),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/user/blog/{}", blog_id),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The blog is untouched
    let (status, fetched) =
        send_json(&app, "GET", &format!("/api/blog/{}", blog_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Owned");
}

#[tokio::test]
async fn test_owner_can_update_and_delete_blog() {
    let app = setup_test_app().await;
    let token = register_and_login(&app, "cruduser1", "crud@example.com").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token),
        Some(json!({ "title": "Draft", "description": "first take" })),
    )
    .await;
    let blog_id = created["id"].as_i64().unwrap();

    // Partial update: only the title changes
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/user/blog/{}", blog_id),
        Some(&token),
        Some(json!({ "title": "Final" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["description"], "first take");

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/user/blog/{}", blog_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "GET", &format!("/api/blog/{}", blog_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_blog_is_not_found() {
    let app = setup_test_app().await;
    let token = register_and_login(&app, "ghostuser", "ghost@example.com").await;

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/user/blog/123456789",
        Some(&token),
        Some(json!({ "title": "nothing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_blogs_only_lists_own_posts() {
    let app = setup_test_app().await;

    let token_a = register_and_login(&app, "authorone", "a1@example.com").await;
    let token_b = register_and_login(&app, "authortwo", "a2@example.com").await;

    send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token_a),
        Some(json!({ "title": "A's post", "description": "" })),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token_b),
        Some(json!({ "title": "B's post", "description": "" })),
    )
    .await;

    let (status, body) = send_json(&app, "GET", "/api/user/blogs", Some(&token_a), None).await;
    assert_eq!(status, StatusCode::OK);

    let posts = body.as_array().expect("should be an array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "A's post");
}

#[tokio::test]
async fn test_user_profile_is_public_and_hides_password() {
    let app = setup_test_app().await;
    let token = register_and_login(&app, "profuser1", "prof@example.com").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token),
        Some(json!({ "title": "Profile post", "description": "" })),
    )
    .await;
    let user_id = created["user_id"].as_i64().unwrap();

    let (status, profile) =
        send_json(&app, "GET", &format!("/api/user/{}", user_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "profuser1");
    assert!(profile.get("password").is_none(), "hash must never be exposed");
    assert_eq!(profile["blogs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = setup_test_app().await;

    let (status, _) = send_json(&app, "GET", "/api/user/42424242", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_requires_token_and_persists() {
    let app = setup_test_app().await;
    let token = register_and_login(&app, "renameuser", "rename@example.com").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/user/blog",
        Some(&token),
        Some(json!({ "title": "t", "description": "" })),
    )
    .await;
    let user_id = created["user_id"].as_i64().unwrap();

    // No token: the gate rejects the update even though the read is public
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/user/{}", user_id),
        None,
        Some(json!({ "username": "renamed99", "email": "renamed@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/user/{}", user_id),
        Some(&token),
        Some(json!({ "username": "renamed99", "email": "renamed@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User successfully updated");

    let (_, profile) = send_json(&app, "GET", &format!("/api/user/{}", user_id), None, None).await;
    assert_eq!(profile["username"], "renamed99");
}
