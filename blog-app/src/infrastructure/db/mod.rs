pub mod entities;
mod blog_repository;
mod category_repository;
mod convert;
mod engagement_repository;
mod user_repository;

pub use blog_repository::{BlogChanges, BlogRepository};
pub use category_repository::CategoryRepository;
pub use engagement_repository::EngagementRepository;
pub use user_repository::UserRepository;

use blog_errors::AppError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        // Statements are idempotent (IF NOT EXISTS); a failure is logged and skipped.
        if let Err(e) = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                statement.to_string(),
            ))
            .await
        {
            tracing::warn!("Migration statement failed: {}", e);
        }
    }

    Ok(())
}

/// Logs a store failure and wraps it for the caller.
pub(crate) fn db_error(err: DbErr) -> AppError {
    tracing::error!("Database error: {}", err);
    AppError::Database(err.to_string())
}

/// Statements recorded by a mock connection. Every repository holding the
/// connection must be dropped first.
#[cfg(test)]
pub(crate) fn transaction_log(db: std::sync::Arc<DatabaseConnection>) -> Vec<sea_orm::Transaction> {
    match std::sync::Arc::try_unwrap(db) {
        Ok(conn) => conn.into_transaction_log(),
        Err(_) => panic!("mock connection is still shared"),
    }
}
