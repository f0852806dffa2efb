//! Repository factory for runtime backend selection.
//!
//! Builds the [`TaskRepository`] selected by [`StorageConfig`], opening the
//! `PostgreSQL` pool and applying embedded migrations when requested.
//!
//! # Example
//!
//! ```ignore
//! let factory = RepositoryFactory::new(config.storage.clone());
//! let repository = factory.create().await?;
//! ```

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use super::{
    ConfigError, InMemoryTaskRepository, PostgresTaskRepository, StorageConfig, StorageMode,
    TaskRepository,
};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// Applying migrations failed.
    #[error("Migration error: {0}")]
    Migration(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory for creating the task repository based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: StorageConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this factory.
    #[must_use]
    pub const fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Creates the repository selected by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the configuration is invalid, the database
    /// is unreachable, or a migration fails.
    pub async fn create(&self) -> Result<Arc<dyn TaskRepository>, FactoryError> {
        self.config.validate()?;

        match self.config.mode {
            StorageMode::InMemory => {
                tracing::info!("Using in-memory task storage");
                Ok(Arc::new(InMemoryTaskRepository::new()))
            }
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                if self.config.run_migrations {
                    Self::run_migrations(&pool).await?;
                }
                tracing::info!(
                    max_connections = self.config.max_connections,
                    "Using PostgreSQL task storage"
                );
                Ok(Arc::new(PostgresTaskRepository::new(pool)))
            }
        }
    }

    /// Creates a `PostgreSQL` connection pool.
    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .database_url
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }

    /// Applies the migrations embedded from `./migrations`.
    async fn run_migrations(pool: &PgPool) -> Result<(), FactoryError> {
        tracing::info!("Applying database migrations");
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|error| FactoryError::Migration(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
