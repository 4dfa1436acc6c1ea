use super::entities::{user, User};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(self.db.as_ref()).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    pub async fn create(
        &self,
        user_data: &crate::domain::User,
        password_hash: String,
    ) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            id: Set(user_data.id),
            username: Set(user_data.username.clone()),
            email: Set(user_data.email.clone()),
            password: Set(password_hash),
            role: Set(user_data.role.as_str().to_string()),
            token_version: Set(user_data.token_version),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await
    }

    /// Bumps the refresh-token version so every outstanding refresh token
    /// stops validating. Returns the number of rows touched.
    pub async fn increment_token_version(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = User::update_many()
            .col_expr(
                user::Column::TokenVersion,
                Expr::col(user::Column::TokenVersion).add(1),
            )
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}
