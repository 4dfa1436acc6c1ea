use crate::domain::{BlogView, Comment, Like, Vote};
use crate::infrastructure::db::entities::blog;
use crate::infrastructure::db::{db_error, BlogRepository, EngagementRepository};
use blog_errors::AppError;
use uuid::Uuid;

/// Comments, votes and likes on a blog. Any authenticated user may engage
/// with any blog.
pub struct EngagementService {
    blogs: BlogRepository,
    engagement: EngagementRepository,
}

impl EngagementService {
    pub fn new(blogs: BlogRepository, engagement: EngagementRepository) -> Self {
        Self { blogs, engagement }
    }

    pub async fn comment(&self, id: Uuid, slug: &str, username: &str, body: &str) -> Result<Comment, AppError> {
        if body.trim().is_empty() {
            return Err(AppError::UserInput("Comment must not be empty".to_string()));
        }
        let blog = self.existing_blog(id, slug).await?;

        let comment = Comment::new(blog.id, username.to_string(), body.to_string());
        let model = self
            .engagement
            .create_comment(&comment)
            .await
            .map_err(db_error)?;
        tracing::info!("{} commented on blog {}", username, blog.id);
        Ok(model.into())
    }

    pub async fn list_comments(&self, id: Uuid, slug: &str) -> Result<Vec<Comment>, AppError> {
        let blog = self.existing_blog(id, slug).await?;
        let models = self
            .engagement
            .list_comments(blog.id)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Records the caller's vote and returns the blog as they now see it.
    /// A value of 0 withdraws the vote.
    pub async fn vote(&self, id: Uuid, slug: &str, username: &str, value: i32) -> Result<BlogView, AppError> {
        if !Vote::is_valid_value(value) {
            return Err(AppError::UserInput("Vote value must be -1, 0 or 1".to_string()));
        }
        let blog = self.existing_blog(id, slug).await?;

        if value == 0 {
            self.engagement
                .delete_vote(blog.id, username)
                .await
                .map_err(db_error)?;
        } else {
            self.engagement
                .upsert_vote(blog.id, username, value)
                .await
                .map_err(db_error)?;
        }
        tracing::info!("{} voted {} on blog {}", username, value, blog.id);

        self.view_for(&blog, username).await
    }

    pub async fn like(&self, id: Uuid, slug: &str, username: &str, is_liked: i32) -> Result<BlogView, AppError> {
        if !Like::is_valid_flag(is_liked) {
            return Err(AppError::UserInput("isLiked must be 0 or 1".to_string()));
        }
        let blog = self.existing_blog(id, slug).await?;

        self.engagement
            .upsert_like(blog.id, username, is_liked)
            .await
            .map_err(db_error)?;
        tracing::info!("{} set like={} on blog {}", username, is_liked, blog.id);

        self.view_for(&blog, username).await
    }

    async fn existing_blog(&self, id: Uuid, slug: &str) -> Result<blog::Model, AppError> {
        self.blogs
            .find_by_id_and_slug(id, slug)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound(format!("blog {id}/{slug}")))
    }

    async fn view_for(&self, blog: &blog::Model, username: &str) -> Result<BlogView, AppError> {
        let loaded = self
            .blogs
            .find_loaded(blog.id, &blog.slug)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound(format!("blog {}", blog.id)))?;
        Ok(BlogView::for_viewer(loaded, Some(username)))
    }
}
