use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use blog_app::domain::User;
use blog_app::infrastructure::auth::{AccessClaims, REFRESH_COOKIE_NAME};
use blog_app::AppContext;
use blog_errors::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const REFRESH_COOKIE_PATH: &str = "/refresh_token";

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub ok: bool,
    pub access_token: String,
}

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token))
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn hello() -> &'static str {
    "Welcome!"
}

pub async fn list_users(State(ctx): State<AppContext>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(ctx.accounts.list_users().await?))
}

pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<bool>, AppError> {
    let created = ctx
        .accounts
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok(Json(created))
}

pub async fn login(
    State(ctx): State<AppContext>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let result = ctx.accounts.login(&req.email, &req.password).await?;
    let jar = jar.add(refresh_cookie(result.refresh_token));
    Ok((
        jar,
        Json(LoginResponse {
            access_token: result.access_token,
            user: result.user,
        }),
    ))
}

pub async fn refresh_token(
    State(ctx): State<AppContext>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<RefreshResponse>), AppError> {
    let presented = jar.get(REFRESH_COOKIE_NAME).map(|c| c.value().to_string());
    let result = ctx.accounts.refresh(presented.as_deref()).await?;

    let jar = match result.refresh_token {
        Some(rotated) => jar.add(refresh_cookie(rotated)),
        None => jar,
    };
    Ok((
        jar,
        Json(RefreshResponse {
            ok: result.ok,
            access_token: result.access_token,
        }),
    ))
}

pub async fn revoke_refresh_tokens(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<bool>, AppError> {
    Ok(Json(ctx.accounts.revoke_refresh_tokens(id).await?))
}

pub async fn current_user(
    State(ctx): State<AppContext>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<Option<User>>, AppError> {
    Ok(Json(ctx.accounts.current_user(claims.sub).await?))
}
