use crate::domain::{Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const REFRESH_COOKIE_NAME: &str = "jid";

const ACCESS_TOKEN_MINUTES: i64 = 15;
const REFRESH_TOKEN_DAYS: i64 = 7;

/// Carried by the bearer token on every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Carried by the `jid` cookie. A token is only honoured while
/// `token_version` matches the user's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub token_version: i32,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenService {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }

    pub fn create_access_token(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_MINUTES)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.access_encoding).map_err(TokenError::Sign)
    }

    pub fn create_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user.id,
            token_version: user.token_version,
            iat: now.timestamp(),
            exp: (now + Duration::days(REFRESH_TOKEN_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.refresh_encoding).map_err(TokenError::Sign)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("access-secret", "refresh-secret")
    }

    fn admin() -> User {
        let mut user = User::new("root".to_string(), "root@example.com".to_string());
        user.role = Role::Admin;
        user.token_version = 3;
        user
    }

    #[test]
    fn test_access_token_carries_identity() {
        let tokens = service();
        let user = admin();

        let token = tokens.create_access_token(&user).unwrap();
        let claims = tokens.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "root");
        assert!(claims.is_admin());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_carries_version() {
        let tokens = service();
        let token = tokens.create_refresh_token(&admin()).unwrap();
        let claims = tokens.verify_refresh_token(&token).unwrap();
        assert_eq!(claims.token_version, 3);
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let tokens = service();
        let user = admin();

        let access = tokens.create_access_token(&user).unwrap();
        let refresh = tokens.create_refresh_token(&user).unwrap();

        assert!(tokens.verify_refresh_token(&access).is_err());
        assert!(tokens.verify_access_token(&refresh).is_err());
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = service().create_access_token(&admin()).unwrap();
        let other = TokenService::new("another-secret", "refresh-secret");
        assert!(matches!(
            other.verify_access_token(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();
        let user = admin();
        let past = Utc::now() - Duration::hours(2);
        let claims = AccessClaims {
            sub: user.id,
            username: user.username,
            role: user.role,
            iat: past.timestamp(),
            exp: (past + Duration::minutes(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        assert!(tokens.verify_access_token(&token).is_err());
    }
}
