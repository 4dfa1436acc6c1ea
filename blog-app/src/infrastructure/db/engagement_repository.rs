use super::entities::{comment, like, vote, Comment, Like, Vote};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

/// Comments, votes and likes. Votes and likes keep a single row per
/// (blog, user) pair and are written with `INSERT .. ON CONFLICT`.
#[derive(Clone)]
pub struct EngagementRepository {
    db: Arc<DatabaseConnection>,
}

impl EngagementRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create_comment(
        &self,
        comment_data: &crate::domain::Comment,
    ) -> Result<comment::Model, DbErr> {
        let active = comment::ActiveModel {
            id: Set(comment_data.id),
            blog_id: Set(comment_data.blog_id),
            username: Set(comment_data.username.clone()),
            body: Set(comment_data.body.clone()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await
    }

    pub async fn list_comments(&self, blog_id: Uuid) -> Result<Vec<comment::Model>, DbErr> {
        Comment::find()
            .filter(comment::Column::BlogId.eq(blog_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Inserts the vote or overwrites the existing (blog, user) row in one
    /// statement.
    pub async fn upsert_vote(&self, blog_id: Uuid, username: &str, value: i32) -> Result<(), DbErr> {
        let now = chrono::Utc::now();
        let active = vote::ActiveModel {
            blog_id: Set(blog_id),
            username: Set(username.to_string()),
            value: Set(value),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        Vote::insert(active)
            .on_conflict(
                OnConflict::columns([vote::Column::BlogId, vote::Column::Username])
                    .update_columns([vote::Column::Value, vote::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(())
    }

    pub async fn delete_vote(&self, blog_id: Uuid, username: &str) -> Result<(), DbErr> {
        Vote::delete_many()
            .filter(vote::Column::BlogId.eq(blog_id))
            .filter(vote::Column::Username.eq(username))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    pub async fn upsert_like(&self, blog_id: Uuid, username: &str, is_liked: i32) -> Result<(), DbErr> {
        let now = chrono::Utc::now();
        let active = like::ActiveModel {
            blog_id: Set(blog_id),
            username: Set(username.to_string()),
            is_liked: Set(is_liked),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        Like::insert(active)
            .on_conflict(
                OnConflict::columns([like::Column::BlogId, like::Column::Username])
                    .update_columns([like::Column::IsLiked, like::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(())
    }
}
