use super::entities::{category, Category};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;

#[derive(Clone)]
pub struct CategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<category::Model>, DbErr> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, DbErr> {
        Category::find()
            .filter(category::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
    }

    /// Matches `lower(name) = lower(input)`.
    pub async fn find_by_name_ignore_case(
        &self,
        name: &str,
    ) -> Result<Option<category::Model>, DbErr> {
        Category::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(category::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(self.db.as_ref())
            .await
    }

    pub async fn create(
        &self,
        category_data: &crate::domain::Category,
    ) -> Result<category::Model, DbErr> {
        let active = category::ActiveModel {
            id: Set(category_data.id),
            name: Set(category_data.name.clone()),
            description: Set(category_data.description.clone()),
            banner_urn: Set(category_data.banner_urn.clone()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await
    }

    pub async fn update(
        &self,
        existing: category::Model,
        name: String,
        description: String,
        banner_urn: Option<String>,
    ) -> Result<category::Model, DbErr> {
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(name);
        active.description = Set(description);
        if let Some(banner) = banner_urn {
            active.banner_urn = Set(Some(banner));
        }
        active.update(self.db.as_ref()).await
    }

    pub async fn set_banner(
        &self,
        existing: category::Model,
        banner_urn: String,
    ) -> Result<category::Model, DbErr> {
        let mut active: category::ActiveModel = existing.into();
        active.banner_urn = Set(Some(banner_urn));
        active.update(self.db.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn rust_category() -> category::Model {
        category::Model {
            id: uuid::Uuid::new_v4(),
            name: "Rust".to_string(),
            description: "Systems programming".to_string(),
            banner_urn: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_ignore_case_lowercases_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![rust_category()]])
            .into_connection();
        let db = Arc::new(db);
        let repo = CategoryRepository::new(db.clone());

        let found = repo.find_by_name_ignore_case("RUST").await.unwrap();
        assert_eq!(found.map(|c| c.name), Some("Rust".to_string()));

        drop(repo);
        let log = crate::infrastructure::db::transaction_log(db);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("LOWER"), "unexpected query: {sql}");
        assert!(sql.contains("rust"), "unexpected query: {sql}");
    }
}
