mod blogs;
mod categories;
mod engagement;
mod upload;
mod users;

use crate::auth::{require_admin, require_auth};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use blog_app::AppContext;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

// Multipart framing on top of the 5MB file cap.
const BODY_LIMIT_BYTES: usize = 6 * 1024 * 1024;

pub fn create_app(ctx: AppContext) -> Router {
    // Open to everyone; viewer-relative reads pick up a token if present.
    let public_routes = Router::new()
        .route("/hello", get(users::hello))
        .route("/users", get(users::list_users))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/refresh_token", post(users::refresh_token))
        .route("/categories", get(categories::list_categories))
        .route("/categories/{name}", get(categories::get_category))
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/{identifier}/{slug}", get(blogs::get_blog))
        .route("/blogs/{identifier}/{slug}/comments", get(engagement::list_comments));

    let authed_routes = Router::new()
        .route("/me", get(users::current_user))
        .route("/blogs", post(blogs::create_blog))
        .route("/blogs/{identifier}", put(blogs::update_blog))
        .route("/blogs/{identifier}/{slug}/image", post(blogs::upload_blog_image))
        .route("/blogs/{identifier}/{slug}/comments", post(engagement::comment_on_blog))
        .route("/blogs/{identifier}/{slug}/vote", post(engagement::vote))
        .route("/blogs/{identifier}/{slug}/like", post(engagement::like))
        .route_layer(middleware::from_fn_with_state(ctx.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/users/{id}/revoke", post(users::revoke_refresh_tokens))
        .route("/categories", post(categories::create_category))
        .route("/categories/{name}", put(categories::update_category))
        .route("/categories/{name}/banner", post(categories::upload_banner))
        .route_layer(middleware::from_fn_with_state(ctx.clone(), require_admin));

    let uploads = ServeDir::new(&ctx.config.upload_dir);

    Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(admin_routes)
        .nest_service("/uploads", uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES)),
        )
        .with_state(ctx)
}
