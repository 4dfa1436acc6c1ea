use axum::{
    extract::{Path, State},
    Extension, Json,
};
use blog_app::domain::{BlogView, Comment};
use blog_app::infrastructure::auth::AccessClaims;
use blog_app::AppContext;
use blog_errors::AppError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub value: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub is_liked: i32,
}

pub async fn list_comments(
    State(ctx): State<AppContext>,
    Path((identifier, slug)): Path<(Uuid, String)>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(ctx.engagement.list_comments(identifier, &slug).await?))
}

pub async fn comment_on_blog(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
    Path((identifier, slug)): Path<(Uuid, String)>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<Comment>, AppError> {
    let comment = ctx
        .engagement
        .comment(identifier, &slug, &claims.username, &req.body)
        .await?;
    Ok(Json(comment))
}

pub async fn vote(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
    Path((identifier, slug)): Path<(Uuid, String)>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<BlogView>, AppError> {
    let view = ctx
        .engagement
        .vote(identifier, &slug, &claims.username, req.value)
        .await?;
    Ok(Json(view))
}

pub async fn like(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
    Path((identifier, slug)): Path<(Uuid, String)>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<BlogView>, AppError> {
    let view = ctx
        .engagement
        .like(identifier, &slug, &claims.username, req.is_liked)
        .await?;
    Ok(Json(view))
}
