use super::entities::{blog, blog_tag, comment, like, tag, vote, Blog, BlogTag, Comment, Like, Tag, Vote};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, LoaderTrait, TransactionTrait};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Fields an author may change after creation. `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub category_name: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Clone)]
pub struct BlogRepository {
    db: Arc<DatabaseConnection>,
}

impl BlogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = Blog::find()
            .filter(blog::Column::Slug.eq(slug))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    /// Inserts the blog, its tags and the tag links in one transaction.
    /// Tags that already exist are left untouched.
    pub async fn create(&self, blog_data: &crate::domain::Blog) -> Result<blog::Model, DbErr> {
        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let active = blog::ActiveModel {
            id: Set(blog_data.id),
            slug: Set(blog_data.slug.clone()),
            title: Set(blog_data.title.clone()),
            description: Set(blog_data.description.clone()),
            body: Set(blog_data.body.clone()),
            image_urn: Set(blog_data.image_urn.clone()),
            category_name: Set(blog_data.category_name.clone()),
            author: Set(blog_data.author.clone()),
            is_published: Set(blog_data.is_published),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        let model = active.insert(&txn).await?;

        for name in &blog_data.tags {
            let new_tag = tag::ActiveModel {
                name: Set(name.clone()),
                created_at: Set(Some(now)),
            };
            Tag::insert(new_tag)
                .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
                .exec_without_returning(&txn)
                .await?;

            let link = blog_tag::ActiveModel {
                blog_id: Set(model.id),
                tag_name: Set(name.clone()),
            };
            BlogTag::insert(link).exec_without_returning(&txn).await?;
        }

        txn.commit().await?;
        Ok(model)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<blog::Model>, DbErr> {
        Blog::find_by_id(id).one(self.db.as_ref()).await
    }

    pub async fn find_by_id_and_slug(
        &self,
        id: Uuid,
        slug: &str,
    ) -> Result<Option<blog::Model>, DbErr> {
        Blog::find()
            .filter(blog::Column::Id.eq(id))
            .filter(blog::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
    }

    /// Blog with tags, comments, votes and likes loaded.
    pub async fn find_loaded(
        &self,
        id: Uuid,
        slug: &str,
    ) -> Result<Option<crate::domain::Blog>, DbErr> {
        let Some(model) = self.find_by_id_and_slug(id, slug).await? else {
            return Ok(None);
        };
        let mut loaded = self.load_collections(vec![model]).await?;
        Ok(loaded.pop())
    }

    pub async fn list_published(
        &self,
        category_name: Option<&str>,
    ) -> Result<Vec<crate::domain::Blog>, DbErr> {
        let mut query = Blog::find()
            .filter(blog::Column::IsPublished.eq(true))
            .order_by_desc(blog::Column::CreatedAt);
        if let Some(name) = category_name {
            query = query.filter(blog::Column::CategoryName.eq(name));
        }
        let models = query.all(self.db.as_ref()).await?;
        self.load_collections(models).await
    }

    async fn load_collections(
        &self,
        models: Vec<blog::Model>,
    ) -> Result<Vec<crate::domain::Blog>, DbErr> {
        let comments = models
            .load_many(
                Comment::find().order_by_asc(comment::Column::CreatedAt),
                self.db.as_ref(),
            )
            .await?;
        let votes = models
            .load_many(Vote::find().order_by_asc(vote::Column::CreatedAt), self.db.as_ref())
            .await?;
        let likes = models
            .load_many(Like::find().order_by_asc(like::Column::CreatedAt), self.db.as_ref())
            .await?;
        let mut tags = self.tags_for(models.iter().map(|m| m.id).collect()).await?;

        let blogs = models
            .into_iter()
            .zip(comments)
            .zip(votes)
            .zip(likes)
            .map(|(((model, comments), votes), likes)| {
                let blog_tags = tags.remove(&model.id).unwrap_or_default();
                crate::domain::Blog::from(model)
                    .with_tags(blog_tags)
                    .with_comments(comments.into_iter().map(Into::into).collect())
                    .with_votes(votes.into_iter().map(Into::into).collect())
                    .with_likes(likes.into_iter().map(Into::into).collect())
            })
            .collect();

        Ok(blogs)
    }

    async fn tags_for(&self, blog_ids: Vec<Uuid>) -> Result<HashMap<Uuid, Vec<String>>, DbErr> {
        if blog_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = BlogTag::find()
            .filter(blog_tag::Column::BlogId.is_in(blog_ids))
            .order_by_asc(blog_tag::Column::TagName)
            .all(self.db.as_ref())
            .await?;

        let mut by_blog: HashMap<Uuid, Vec<String>> = HashMap::new();
        for link in links {
            by_blog.entry(link.blog_id).or_default().push(link.tag_name);
        }
        Ok(by_blog)
    }

    pub async fn update(
        &self,
        existing: blog::Model,
        changes: BlogChanges,
    ) -> Result<blog::Model, DbErr> {
        let mut active: blog::ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(body) = changes.body {
            active.body = Set(body);
        }
        if let Some(category_name) = changes.category_name {
            active.category_name = Set(category_name);
        }
        if let Some(is_published) = changes.is_published {
            active.is_published = Set(is_published);
        }
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(self.db.as_ref()).await
    }

    pub async fn set_image(
        &self,
        existing: blog::Model,
        image_urn: String,
    ) -> Result<blog::Model, DbErr> {
        let mut active: blog::ActiveModel = existing.into();
        active.image_urn = Set(Some(image_urn));
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(self.db.as_ref()).await
    }
}
