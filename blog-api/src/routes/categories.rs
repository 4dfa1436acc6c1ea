use super::upload::{read_file_field, UploadResponse};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use blog_app::domain::Category;
use blog_app::AppContext;
use blog_errors::AppError;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub banner_urn: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub new_name: String,
    pub desc: String,
    pub new_banner: Option<String>,
}

pub async fn list_categories(State(ctx): State<AppContext>) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(ctx.categories.list_all().await?))
}

pub async fn get_category(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<Option<Category>>, AppError> {
    Ok(Json(ctx.categories.get_by_name(&name).await?))
}

pub async fn create_category(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let category = ctx
        .categories
        .create(&req.name, &req.desc, req.banner_urn)
        .await?;
    Ok(Json(category))
}

pub async fn update_category(
    State(ctx): State<AppContext>,
    Path(old_name): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let category = ctx
        .categories
        .update(&old_name, &req.new_name, &req.desc, req.new_banner)
        .await?;
    Ok(Json(category))
}

pub async fn upload_banner(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    let url = ctx
        .categories
        .upload_banner(&name, &file.file_name, &file.bytes)
        .await?;
    Ok(Json(UploadResponse { url }))
}
