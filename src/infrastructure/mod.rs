//! Infrastructure layer: storage backends and configuration.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use config::{AppConfig, ConfigError, StorageConfig, StorageMode};
pub use factory::{FactoryError, RepositoryFactory};
pub use in_memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
pub use repository::{OwnerScope, PaginatedResult, Pagination, RepositoryError, TaskRepository};
