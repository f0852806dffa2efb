//! Application configuration management.
//!
//! Configuration is loaded once at startup from environment variables (a
//! `.env` file is honoured through `dotenvy`). Missing or invalid values are
//! reported as [`ConfigError`] before the server binds its socket.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `postgres` (default) | `in_memory`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 15)
//! - `RUN_MIGRATIONS`: apply embedded migrations at startup (default: false)
//! - `JWT_SECRET`: shared HS256 secret (required)
//! - `JWT_ISSUER`: expected `iss` claim (optional)
//! - `CORS_ORIGINS`: comma-separated allowed origins (optional)
//! - `HOST` / `PORT`: bind address (default: `0.0.0.0` / 8000)

use std::env;
use std::str::FromStr;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Storage backend for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart.
    InMemory,
    /// `PostgreSQL` storage for production use.
    #[default]
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Settings for the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend to use.
    pub mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Whether to apply the embedded migrations at startup.
    pub run_migrations: bool,
}

impl StorageConfig {
    /// Default pool size.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 15;

    /// Configuration for the in-memory backend.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            mode: StorageMode::InMemory,
            database_url: None,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            run_migrations: false,
        }
    }

    /// Configuration for the `PostgreSQL` backend.
    #[must_use]
    pub fn postgres(database_url: impl Into<String>) -> Self {
        Self {
            mode: StorageMode::Postgres,
            database_url: Some(database_url.into()),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            run_migrations: false,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `PostgreSQL` is selected without a URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == StorageMode::Postgres && self.database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Task store settings.
    pub storage: StorageConfig,
    /// Shared secret used to verify bearer tokens.
    pub jwt_secret: String,
    /// Expected token issuer, if any.
    pub jwt_issuer: Option<String>,
    /// Origins allowed by CORS. Empty means any origin without credentials.
    pub cors_origins: Vec<String>,
    /// HTTP server host address.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if a required variable is not set.
    /// Returns `ConfigError::InvalidValue` if a variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage = StorageConfig {
            mode: read("STORAGE_MODE")
                .map(|value| value.parse::<StorageMode>())
                .transpose()?
                .unwrap_or_default(),
            database_url: read("DATABASE_URL"),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                read("DATABASE_MAX_CONNECTIONS"),
                StorageConfig::DEFAULT_MAX_CONNECTIONS,
            )?,
            run_migrations: parse_flag("RUN_MIGRATIONS", read("RUN_MIGRATIONS"))?,
        };
        storage.validate()?;

        let jwt_secret =
            read("JWT_SECRET").ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let cors_origins: Vec<String> = read("CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            storage,
            jwt_secret,
            jwt_issuer: read("JWT_ISSUER"),
            cors_origins,
            host: read("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", read("PORT"), 8000)?,
        })
    }

    /// Creates a configuration with in-memory storage, used by tests and local runs.
    #[must_use]
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            storage: StorageConfig::in_memory(),
            jwt_secret: jwt_secret.into(),
            jwt_issuer: None,
            cors_origins: Vec::new(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }

    /// Returns the `host:port` address the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |value| {
        value.parse().map_err(|error: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        })
    })
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("0" | "false" | "no" | "off") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some(other) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}
