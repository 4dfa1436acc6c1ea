use axum::http::StatusCode;
use axum_test::TestServer;
use blog_api::create_app;
use blog_app::domain::{Role, User};
use blog_app::infrastructure::auth::TokenService;
use blog_app::infrastructure::db::entities::{blog, blog_tag, category, comment, like, vote};
use blog_app::{AppContext, Config};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::json;

const ACCESS_SECRET: &str = "test-access-secret";
const REFRESH_SECRET: &str = "test-refresh-secret";

fn config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        access_token_secret: ACCESS_SECRET.to_string(),
        refresh_token_secret: REFRESH_SECRET.to_string(),
        base_url: "http://localhost:4000".to_string(),
        upload_dir: std::env::temp_dir().to_string_lossy().into_owned(),
        bind_addr: "127.0.0.1:0".to_string(),
        run_migrations: false,
    }
}

fn server_with(db: DatabaseConnection) -> TestServer {
    TestServer::new(create_app(AppContext::new(config(), db))).unwrap()
}

fn server() -> TestServer {
    server_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

fn token_for(role: Role) -> String {
    let mut user = User::new("dave".to_string(), "dave@example.com".to_string());
    user.role = role;
    TokenService::new(ACCESS_SECRET, REFRESH_SECRET)
        .create_access_token(&user)
        .unwrap()
}

#[tokio::test]
async fn test_hello() {
    let response = server().get("/hello").await;

    response.assert_status_ok();
    response.assert_text("Welcome!");
}

#[tokio::test]
async fn test_me_requires_token() {
    let response = server().get("/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_forged_token_is_rejected() {
    let forged = TokenService::new("someone-else", REFRESH_SECRET)
        .create_access_token(&User::new("eve".to_string(), "eve@example.com".to_string()))
        .unwrap();

    let response = server().get("/me").authorization_bearer(forged).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_category_requires_admin() {
    let server = server();
    let payload = json!({ "name": "rust", "desc": "Rust posts" });

    let response = server.post("/categories").json(&payload).await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/categories")
        .authorization_bearer(token_for(Role::AuthUser))
        .json(&payload)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_create_category_validates_name() {
    let response = server()
        .post("/categories")
        .authorization_bearer(token_for(Role::Admin))
        .json(&json!({ "name": "  ", "desc": "empty" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["errors"]["name"].is_string());
}

#[tokio::test]
async fn test_create_blog_reports_field_errors() {
    let response = server()
        .post("/blogs")
        .authorization_bearer(token_for(Role::AuthUser))
        .json(&json!({ "title": "", "body": "", "categoryName": "rust" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["errors"]["title"].is_string());
    assert!(body["errors"]["body"].is_string());
    assert!(body["errors"].get("categoryName").is_none());
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let response = server().get("/categories/%20").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_categories() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category::Model {
            id: uuid::Uuid::new_v4(),
            name: "rust".to_string(),
            description: "Rust posts".to_string(),
            banner_urn: None,
            created_at: None,
        }]])
        .into_connection();

    let response = server_with(db).get("/categories").await;

    response.assert_status_ok();
    let categories: serde_json::Value = response.json();
    assert_eq!(categories.as_array().unwrap().len(), 1);
    assert_eq!(categories[0]["name"], "rust");
    assert_eq!(categories[0]["desc"], "Rust posts");
}

#[tokio::test]
async fn test_unknown_blog_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<blog::Model>::new()])
        .into_connection();

    let path = format!("/blogs/{}/missing", uuid::Uuid::new_v4());
    let response = server_with(db).get(&path).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vote_requires_token() {
    let path = format!("/blogs/{}/some-post/vote", uuid::Uuid::new_v4());
    let response = server().post(&path).json(&json!({ "value": 1 })).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_without_cookie_is_rejected() {
    let response = server().post("/refresh_token").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["accessToken"], "");
}

fn published_blog(slug: &str) -> blog::Model {
    blog::Model {
        id: uuid::Uuid::new_v4(),
        slug: slug.to_string(),
        title: slug.to_string(),
        description: String::new(),
        body: "body".to_string(),
        image_urn: None,
        category_name: "rust".to_string(),
        author: "carol".to_string(),
        is_published: true,
        created_at: None,
        updated_at: None,
    }
}

fn listed_blog_db(blog: &blog::Model) -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![blog.clone()]])
        .append_query_results([Vec::<comment::Model>::new()])
        .append_query_results([vec![vote::Model {
            blog_id: blog.id,
            username: "dave".to_string(),
            value: -1,
            created_at: None,
            updated_at: None,
        }]])
        .append_query_results([Vec::<like::Model>::new()])
        .append_query_results([Vec::<blog_tag::Model>::new()])
        .into_connection()
}

#[tokio::test]
async fn test_blog_slugged_image_is_readable() {
    let blog = published_blog("image");
    let path = format!("/blogs/{}/image", blog.id);

    let response = server_with(listed_blog_db(&blog)).get(&path).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["slug"], "image");
}

#[tokio::test]
async fn test_image_upload_requires_token() {
    let path = format!("/blogs/{}/image/image", uuid::Uuid::new_v4());
    let response = server().post(&path).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_blogs_anonymous_has_no_viewer_fields() {
    let blog = published_blog("hello");

    let response = server_with(listed_blog_db(&blog)).get("/blogs").await;

    response.assert_status_ok();
    let blogs: serde_json::Value = response.json();
    assert_eq!(blogs[0]["voteScore"], -1);
    assert!(blogs[0].get("userVote").is_none());
    assert!(blogs[0].get("userLike").is_none());
}

#[tokio::test]
async fn test_list_blogs_annotates_signed_in_viewer() {
    let blog = published_blog("hello");

    let response = server_with(listed_blog_db(&blog))
        .get("/blogs")
        .authorization_bearer(token_for(Role::AuthUser))
        .await;

    response.assert_status_ok();
    let blogs: serde_json::Value = response.json();
    assert_eq!(blogs[0]["userVote"], -1);
    assert_eq!(blogs[0]["userLike"], 0);
}
