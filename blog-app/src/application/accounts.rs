use crate::domain::User;
use crate::infrastructure::auth::{hash_password, verify_password, TokenService};
use crate::infrastructure::db::{db_error, UserRepository};
use crate::infrastructure::security::InputSanitizer;
use blog_errors::{AppError, FieldErrors};
use uuid::Uuid;

#[derive(Debug)]
pub struct LoginResult {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Outcome of a refresh attempt. `refresh_token` is the rotated cookie
/// value and is only present when `ok` is true.
#[derive(Debug)]
pub struct RefreshResult {
    pub ok: bool,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl RefreshResult {
    fn rejected() -> Self {
        Self {
            ok: false,
            access_token: String::new(),
            refresh_token: None,
        }
    }
}

pub struct AccountService {
    users: UserRepository,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.list_all().await.map_err(db_error)?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Returns false when the row could not be inserted, e.g. because the
    /// username or email is taken.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<bool, AppError> {
        let mut errors = FieldErrors::new();
        InputSanitizer::require(&mut errors, "username", username, "Username must not be empty");
        InputSanitizer::require(&mut errors, "email", email, "Email must not be empty");
        InputSanitizer::require(&mut errors, "password", password, "Password must not be empty");
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let hashed = hash_password(password)?;
        let user = User::new(username.trim().to_string(), email.trim().to_string());

        match self.users.create(&user, hashed).await {
            Ok(_) => {
                tracing::info!("Registered user {}", user.username);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Registration of {} failed: {}", user.username, e);
                Ok(false)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let model = self
            .users
            .find_by_email(email.trim())
            .await
            .map_err(db_error)?
            .ok_or_else(|| {
                AppError::Unauthenticated("This email is not registered, please sign up first".to_string())
            })?;

        if !verify_password(password, &model.password) {
            return Err(AppError::Unauthenticated("Wrong password, please try again".to_string()));
        }

        let user: User = model.into();
        let access_token = self.issue_access_token(&user)?;
        let refresh_token = self.issue_refresh_token(&user)?;
        tracing::info!("User {} logged in", user.username);

        Ok(LoginResult {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Exchanges a refresh cookie for a new access token. Any problem with
    /// the cookie yields a rejected result rather than an error.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<RefreshResult, AppError> {
        let Some(token) = refresh_token else {
            return Ok(RefreshResult::rejected());
        };

        let claims = match self.tokens.verify_refresh_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("Refresh rejected: {}", e);
                return Ok(RefreshResult::rejected());
            }
        };

        let Some(model) = self.users.find_by_id(claims.sub).await.map_err(db_error)? else {
            return Ok(RefreshResult::rejected());
        };
        if model.token_version != claims.token_version {
            tracing::warn!("Refresh rejected for {}: token revoked", model.username);
            return Ok(RefreshResult::rejected());
        }

        let user: User = model.into();
        Ok(RefreshResult {
            ok: true,
            access_token: self.issue_access_token(&user)?,
            refresh_token: Some(self.issue_refresh_token(&user)?),
        })
    }

    /// Invalidates every refresh token issued to the user. Always reports
    /// success; an unknown id only leaves a warning in the log.
    pub async fn revoke_refresh_tokens(&self, user_id: Uuid) -> Result<bool, AppError> {
        let touched = self
            .users
            .increment_token_version(user_id)
            .await
            .map_err(db_error)?;
        if touched == 0 {
            tracing::warn!("Revoke requested for unknown user {}", user_id);
        } else {
            tracing::info!("Revoked refresh tokens of user {}", user_id);
        }
        Ok(true)
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let user = self.users.find_by_id(user_id).await.map_err(db_error)?;
        Ok(user.map(Into::into))
    }

    fn issue_access_token(&self, user: &User) -> Result<String, AppError> {
        self.tokens
            .create_access_token(user)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    fn issue_refresh_token(&self, user: &User) -> Result<String, AppError> {
        self.tokens
            .create_refresh_token(user)
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}
