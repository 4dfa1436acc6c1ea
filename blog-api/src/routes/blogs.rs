use super::upload::{read_file_field, UploadResponse};
use crate::auth::Viewer;
use axum::{
    extract::{Multipart, Path, Query, State},
    Extension, Json,
};
use blog_app::application::{CreateBlogInput, UpdateBlogInput};
use blog_app::domain::BlogView;
use blog_app::infrastructure::auth::AccessClaims;
use blog_app::AppContext;
use blog_errors::AppError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListBlogsQuery {
    pub category: Option<String>,
}

pub async fn list_blogs(
    State(ctx): State<AppContext>,
    viewer: Viewer,
    Query(query): Query<ListBlogsQuery>,
) -> Result<Json<Vec<BlogView>>, AppError> {
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    Ok(Json(ctx.blogs.list(category, viewer.username()).await?))
}

pub async fn get_blog(
    State(ctx): State<AppContext>,
    viewer: Viewer,
    Path((identifier, slug)): Path<(Uuid, String)>,
) -> Result<Json<BlogView>, AppError> {
    Ok(Json(ctx.blogs.get(identifier, &slug, viewer.username()).await?))
}

pub async fn create_blog(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
    Json(input): Json<CreateBlogInput>,
) -> Result<Json<BlogView>, AppError> {
    Ok(Json(ctx.blogs.create(&claims.username, input).await?))
}

pub async fn update_blog(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
    Path(identifier): Path<Uuid>,
    Json(input): Json<UpdateBlogInput>,
) -> Result<Json<BlogView>, AppError> {
    Ok(Json(ctx.blogs.update(&claims.username, identifier, input).await?))
}

pub async fn upload_blog_image(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
    Path((identifier, slug)): Path<(Uuid, String)>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    let url = ctx
        .blogs
        .upload_image(&claims.username, identifier, &slug, &file.file_name, &file.bytes)
        .await?;
    Ok(Json(UploadResponse { url }))
}
