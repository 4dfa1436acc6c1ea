use crate::domain::{slugify, Blog, BlogView};
use crate::infrastructure::db::entities::blog;
use crate::infrastructure::db::{db_error, BlogChanges, BlogRepository, CategoryRepository};
use crate::infrastructure::security::InputSanitizer;
use crate::infrastructure::storage::UploadStore;
use blog_errors::{AppError, FieldErrors};
use serde::Deserialize;
use uuid::Uuid;

const IMAGE_FOLDER: &str = "blogs";
const SLUG_SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogInput {
    pub title: String,
    #[serde(default, rename = "desc")]
    pub description: String,
    pub body: String,
    pub category_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_urn: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogInput {
    pub title: Option<String>,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub body: Option<String>,
    pub category_name: Option<String>,
    pub is_published: Option<bool>,
}

pub struct BlogService {
    blogs: BlogRepository,
    categories: CategoryRepository,
    uploads: UploadStore,
}

impl BlogService {
    pub fn new(blogs: BlogRepository, categories: CategoryRepository, uploads: UploadStore) -> Self {
        Self {
            blogs,
            categories,
            uploads,
        }
    }

    pub async fn create(&self, author: &str, input: CreateBlogInput) -> Result<BlogView, AppError> {
        let mut errors = FieldErrors::new();
        InputSanitizer::require(&mut errors, "title", &input.title, "Title must not be empty");
        InputSanitizer::require(&mut errors, "body", &input.body, "Body must not be empty");
        InputSanitizer::require(&mut errors, "categoryName", &input.category_name, "Choose a category");
        if !errors.is_empty() {
            return Err(errors.into());
        }

        if self
            .categories
            .find_by_name(&input.category_name)
            .await
            .map_err(db_error)?
            .is_none()
        {
            errors.add("categoryName", "This category does not exist");
            return Err(errors.into());
        }

        let mut blog = Blog::new(
            input.title.trim().to_string(),
            input.description,
            input.body,
            input.category_name,
            author.to_string(),
        )
        .with_tags(InputSanitizer::normalize_tags(&input.tags))
        .with_image_urn(input.image_urn.filter(|urn| !urn.trim().is_empty()))
        .with_published(input.is_published);
        blog.slug = self.unique_slug(&blog.title, blog.id).await?;

        let model = self.blogs.create(&blog).await.map_err(db_error)?;
        tracing::info!("{} created blog {} ({})", author, model.slug, model.id);

        let created = Blog::from(model)
            .with_tags(blog.tags)
            .with_comments(Vec::new())
            .with_votes(Vec::new())
            .with_likes(Vec::new());
        Ok(BlogView::for_viewer(created, Some(author)))
    }

    /// Slug for a new blog. Falls back to a suffix taken from the blog id
    /// when the plain slug is empty or already used.
    async fn unique_slug(&self, title: &str, id: Uuid) -> Result<String, AppError> {
        let base = slugify(title);
        let suffix: String = id.simple().to_string().chars().take(SLUG_SUFFIX_LEN).collect();

        if base.is_empty() {
            return Ok(suffix);
        }
        if self.blogs.slug_exists(&base).await.map_err(db_error)? {
            return Ok(format!("{base}-{suffix}"));
        }
        Ok(base)
    }

    pub async fn get(&self, id: Uuid, slug: &str, viewer: Option<&str>) -> Result<BlogView, AppError> {
        let blog = self
            .blogs
            .find_loaded(id, slug)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound(format!("blog {id}/{slug}")))?;
        Ok(BlogView::for_viewer(blog, viewer))
    }

    pub async fn list(&self, category_name: Option<&str>, viewer: Option<&str>) -> Result<Vec<BlogView>, AppError> {
        let blogs = self
            .blogs
            .list_published(category_name)
            .await
            .map_err(db_error)?;
        Ok(blogs
            .into_iter()
            .map(|blog| BlogView::for_viewer(blog, viewer))
            .collect())
    }

    /// Applies an author's edits. The slug stays as generated at creation.
    pub async fn update(&self, author: &str, id: Uuid, input: UpdateBlogInput) -> Result<BlogView, AppError> {
        let mut errors = FieldErrors::new();
        InputSanitizer::require_if_present(&mut errors, "title", input.title.as_deref(), "Title must not be empty");
        InputSanitizer::require_if_present(&mut errors, "body", input.body.as_deref(), "Body must not be empty");
        InputSanitizer::require_if_present(
            &mut errors,
            "categoryName",
            input.category_name.as_deref(),
            "Choose a category",
        );
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let existing = self.owned_blog(author, id).await?;

        if let Some(category_name) = input.category_name.as_deref() {
            if self
                .categories
                .find_by_name(category_name)
                .await
                .map_err(db_error)?
                .is_none()
            {
                errors.add("categoryName", "This category does not exist");
                return Err(errors.into());
            }
        }

        let changes = BlogChanges {
            title: input.title.map(|t| t.trim().to_string()),
            description: input.description,
            body: input.body,
            category_name: input.category_name,
            is_published: input.is_published,
        };
        let updated = self.blogs.update(existing, changes).await.map_err(db_error)?;
        tracing::info!("{} updated blog {}", author, updated.id);

        self.get(updated.id, &updated.slug, Some(author)).await
    }

    pub async fn upload_image(
        &self,
        author: &str,
        id: Uuid,
        slug: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let found = self
            .blogs
            .find_by_id_and_slug(id, slug)
            .await
            .map_err(db_error)?;
        let existing = Self::check_author(author, id, found)?;
        let url = self.uploads.save(IMAGE_FOLDER, file_name, bytes).await?;
        self.blogs
            .set_image(existing, url.clone())
            .await
            .map_err(db_error)?;
        Ok(url)
    }

    async fn owned_blog(&self, author: &str, id: Uuid) -> Result<blog::Model, AppError> {
        let found = self.blogs.find_by_id(id).await.map_err(db_error)?;
        Self::check_author(author, id, found)
    }

    fn check_author(author: &str, id: Uuid, found: Option<blog::Model>) -> Result<blog::Model, AppError> {
        let existing = found.ok_or_else(|| AppError::NotFound(format!("blog {id}")))?;
        if existing.author != author {
            tracing::warn!("{} tried to modify blog {} owned by {}", author, id, existing.author);
            return Err(AppError::Forbidden("only the author may edit this blog".to_string()));
        }
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::entities::category;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> BlogService {
        let db = Arc::new(db);
        BlogService::new(
            BlogRepository::new(db.clone()),
            CategoryRepository::new(db),
            UploadStore::new(std::env::temp_dir(), "http://localhost:4000"),
        )
    }

    fn input(title: &str, body: &str) -> CreateBlogInput {
        CreateBlogInput {
            title: title.to_string(),
            description: String::new(),
            body: body.to_string(),
            category_name: "rust".to_string(),
            tags: vec![],
            image_urn: None,
            is_published: true,
        }
    }

    fn blog_model(author: &str) -> blog::Model {
        blog::Model {
            id: Uuid::new_v4(),
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            description: String::new(),
            body: "body".to_string(),
            image_urn: None,
            category_name: "rust".to_string(),
            author: author.to_string(),
            is_published: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_title_and_body() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = service(db).create("alice", input("", " ")).await.unwrap_err();

        let fields = err.field_errors().unwrap();
        assert!(fields.get("title").is_some());
        assert!(fields.get("body").is_some());
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<category::Model>::new()])
            .into_connection();

        let err = service(db).create("alice", input("Hello", "World")).await.unwrap_err();
        assert_eq!(
            err.field_errors().and_then(|f| f.get("categoryName")),
            Some("This category does not exist")
        );
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![blog_model("alice")]])
            .into_connection();

        let err = service(db)
            .update("mallory", Uuid::new_v4(), UpdateBlogInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let changes = UpdateBlogInput {
            title: Some("  ".to_string()),
            ..Default::default()
        };

        let err = service(db).update("alice", Uuid::new_v4(), changes).await.unwrap_err();
        assert!(err.field_errors().and_then(|f| f.get("title")).is_some());
    }

    #[tokio::test]
    async fn test_get_unknown_blog() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<blog::Model>::new()])
            .into_connection();

        let err = service(db).get(Uuid::new_v4(), "missing", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_annotates_each_blog_for_viewer() {
        use crate::infrastructure::db::entities::{blog_tag, comment, like, vote};

        let mine = blog_model("carol");
        let theirs = blog_model("dave");
        let vote_row = |blog_id, value| vote::Model {
            blog_id,
            username: "bob".to_string(),
            value,
            created_at: None,
            updated_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![mine.clone(), theirs.clone()]])
            .append_query_results([Vec::<comment::Model>::new()])
            .append_query_results([vec![vote_row(theirs.id, -1), vote_row(mine.id, 1)]])
            .append_query_results([vec![like::Model {
                blog_id: theirs.id,
                username: "bob".to_string(),
                is_liked: 1,
                created_at: None,
                updated_at: None,
            }]])
            .append_query_results([Vec::<blog_tag::Model>::new()])
            .into_connection();

        let views = service(db).list(None, Some("bob")).await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, mine.id);
        assert_eq!(views[0].user_vote, Some(1));
        assert_eq!(views[0].user_like, Some(0));
        assert_eq!(views[1].id, theirs.id);
        assert_eq!(views[1].vote_score, -1);
        assert_eq!(views[1].user_vote, Some(-1));
        assert_eq!(views[1].user_like, Some(1));
    }
}
