use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use blog_app::infrastructure::auth::AccessClaims;
use blog_app::AppContext;
use blog_errors::AppError;
use std::convert::Infallible;

fn authenticate(ctx: &AppContext, bearer: Option<TypedHeader<Authorization<Bearer>>>) -> Result<AccessClaims, AppError> {
    let TypedHeader(auth) =
        bearer.ok_or_else(|| AppError::Unauthenticated("Missing bearer token".to_string()))?;

    ctx.tokens().verify_access_token(auth.token()).map_err(|e| {
        tracing::warn!("Rejected access token: {}", e);
        AppError::Unauthenticated("Authentication failed".to_string())
    })
}

/// Runs before handlers that need a signed-in user and hands them the
/// token claims through request extensions.
pub async fn require_auth(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&ctx, bearer)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&ctx, bearer)?;
    if !claims.is_admin() {
        tracing::warn!("{} attempted an admin operation", claims.username);
        return Err(AppError::Forbidden("admin only".to_string()));
    }
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// The requesting user on public reads, if a valid bearer token came with
/// the request. A bad token is treated as no token.
pub struct Viewer(pub Option<AccessClaims>);

impl Viewer {
    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.username.as_str())
    }
}

impl FromRequestParts<AppContext> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, ctx)
            .await
            .ok();
        Ok(Viewer(authenticate(ctx, bearer).ok()))
    }
}
