use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    AuthUser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::AuthUser => "auth_user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "auth_user" => Ok(Self::AuthUser),
            other => Err(format!("unknown role `{other}`")),
        }
    }
}

/// Account as exposed to clients. The password hash stays in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip)]
    pub token_version: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            username,
            email,
            role: Role::AuthUser,
            token_version: 0,
            created_at: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
