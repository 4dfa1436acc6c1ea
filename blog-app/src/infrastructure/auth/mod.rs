mod password;
mod tokens;

pub use password::{hash_password, verify_password};
pub use tokens::{AccessClaims, RefreshClaims, TokenError, TokenService, REFRESH_COOKIE_NAME};
