use crate::application::{AccountService, BlogService, CategoryService, EngagementService};
use crate::config::Config;
use crate::infrastructure::auth::TokenService;
use crate::infrastructure::db::{
    self, BlogRepository, CategoryRepository, EngagementRepository, UserRepository,
};
use crate::infrastructure::storage::UploadStore;
use blog_errors::AppError;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub accounts: Arc<AccountService>,
    pub categories: Arc<CategoryService>,
    pub blogs: Arc<BlogService>,
    pub engagement: Arc<EngagementService>,
}

impl AppContext {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let tokens = TokenService::new(&config.access_token_secret, &config.refresh_token_secret);
        let uploads = UploadStore::new(&config.upload_dir, &config.base_url);

        let db = Arc::new(db);
        let users = UserRepository::new(db.clone());
        let category_repo = CategoryRepository::new(db.clone());
        let blog_repo = BlogRepository::new(db.clone());
        let engagement_repo = EngagementRepository::new(db);

        Self {
            accounts: Arc::new(AccountService::new(users, tokens)),
            categories: Arc::new(CategoryService::new(category_repo.clone(), uploads.clone())),
            blogs: Arc::new(BlogService::new(blog_repo.clone(), category_repo, uploads)),
            engagement: Arc::new(EngagementService::new(blog_repo, engagement_repo)),
            config: Arc::new(config),
        }
    }

    /// Opens the connection pool, applies the bundled migration when asked
    /// to, and wires every service.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        let conn = db::create_connection(&config.database_url)
            .await
            .map_err(|e| AppError::Database(format!("cannot connect: {e}")))?;
        tracing::info!("Connected to database");

        if config.run_migrations {
            db::run_migrations(&conn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            tracing::info!("Migrations applied");
        }

        Ok(Self::new(config, conn))
    }

    pub fn tokens(&self) -> &TokenService {
        self.accounts.tokens()
    }
}
