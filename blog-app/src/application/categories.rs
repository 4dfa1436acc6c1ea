use crate::domain::Category;
use crate::infrastructure::db::{db_error, CategoryRepository};
use crate::infrastructure::security::InputSanitizer;
use crate::infrastructure::storage::UploadStore;
use blog_errors::{AppError, FieldErrors};

const BANNER_FOLDER: &str = "categories";

pub struct CategoryService {
    categories: CategoryRepository,
    uploads: UploadStore,
}

impl CategoryService {
    pub fn new(categories: CategoryRepository, uploads: UploadStore) -> Self {
        Self { categories, uploads }
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        banner_urn: Option<String>,
    ) -> Result<Category, AppError> {
        let mut errors = FieldErrors::new();
        InputSanitizer::require(&mut errors, "name", name, "Category name must not be empty");

        if errors.is_empty()
            && self
                .categories
                .find_by_name_ignore_case(name.trim())
                .await
                .map_err(db_error)?
                .is_some()
        {
            errors.add("name", "A category with this name already exists");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let category = Category::new(name.trim().to_string(), description.to_string(), banner_urn);
        let model = self.categories.create(&category).await.map_err(db_error)?;
        tracing::info!("Created category {}", model.name);
        Ok(model.into())
    }

    pub async fn list_all(&self) -> Result<Vec<Category>, AppError> {
        let models = self.categories.list_all().await.map_err(db_error)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::UserInput("Category name must not be empty".to_string()));
        }
        let model = self.categories.find_by_name(name).await.map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    /// Renames and re-describes a category. The banner only changes when a
    /// new one is given.
    pub async fn update(
        &self,
        old_name: &str,
        new_name: &str,
        description: &str,
        new_banner: Option<String>,
    ) -> Result<Category, AppError> {
        let mut errors = FieldErrors::new();
        InputSanitizer::require(&mut errors, "oldName", old_name, "Enter the name of the category to replace");
        InputSanitizer::require(&mut errors, "newName", new_name, "Category name must not be empty");
        InputSanitizer::require(&mut errors, "desc", description, "Description must not be empty");
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let Some(existing) = self.categories.find_by_name(old_name).await.map_err(db_error)? else {
            errors.add("name", "The category to update does not exist, create it instead");
            return Err(errors.into());
        };

        // The name may keep its row but not take another category's name.
        if let Some(clash) = self
            .categories
            .find_by_name_ignore_case(new_name.trim())
            .await
            .map_err(db_error)?
        {
            if clash.id != existing.id {
                errors.add("newName", "A category with this name already exists");
                return Err(errors.into());
            }
        }

        let new_banner = new_banner.filter(|b| !b.trim().is_empty());
        let model = self
            .categories
            .update(existing, new_name.trim().to_string(), description.to_string(), new_banner)
            .await
            .map_err(db_error)?;
        tracing::info!("Updated category {} -> {}", old_name, model.name);
        Ok(model.into())
    }

    /// Stores a banner image for `category_name` and returns its URL.
    pub async fn upload_banner(
        &self,
        category_name: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let existing = self
            .categories
            .find_by_name(category_name)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound(format!("category {category_name}")))?;

        let url = self.uploads.save(BANNER_FOLDER, file_name, bytes).await?;
        self.categories
            .set_banner(existing, url.clone())
            .await
            .map_err(db_error)?;
        Ok(url)
    }
}
