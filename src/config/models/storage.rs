//! Storage configuration
//!
//! The presence of a database or Redis URL is what switches the service from
//! process-local quota tracking to durable tracking.

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQL database for submissions and quota records
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Redis for quota records (takes precedence over the database for quota)
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    /// Upper bound for a single store operation, in seconds
    #[serde(default = "default_store_timeout")]
    pub operation_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: None,
            redis: None,
            operation_timeout_secs: default_store_timeout(),
        }
    }
}

/// Which backing store each concern ends up using
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// No durable store: local quota, history and sharing disabled
    Local,
    /// SQL database for quota and submissions
    Database,
    /// Redis for quota, SQL database for submissions
    RedisAndDatabase,
    /// Redis for quota, history and sharing disabled
    Redis,
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.redis.is_some() {
            self.redis = other.redis;
        }
        if other.operation_timeout_secs != default_store_timeout() {
            self.operation_timeout_secs = other.operation_timeout_secs;
        }
        self
    }

    /// Resolve the storage mode from which credentials are present
    pub fn mode(&self) -> StorageMode {
        match (self.database.is_some(), self.redis.is_some()) {
            (false, false) => StorageMode::Local,
            (true, false) => StorageMode::Database,
            (true, true) => StorageMode::RedisAndDatabase,
            (false, true) => StorageMode::Redis,
        }
    }

    /// Store operation timeout
    pub fn operation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.operation_timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.operation_timeout_secs == 0 {
            return Err("Storage operation timeout cannot be 0".to_string());
        }
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(redis) = &self.redis {
            if !redis.url.starts_with("redis://") && !redis.url.starts_with("rediss://") {
                return Err("Redis URL must start with redis:// or rediss://".to_string());
            }
        }
        Ok(())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Run migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Database config for a URL with default pool settings
    pub fn with_url<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            run_migrations: default_run_migrations(),
        }
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if !(self.url.starts_with("sqlite:")
            || self.url.starts_with("postgres://")
            || self.url.starts_with("postgresql://"))
        {
            return Err(format!(
                "Unsupported database URL scheme: {}",
                crate::utils::sanitize_url(&self.url)
            ));
        }
        if self.max_connections == 0 {
            return Err("Database max_connections cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis URL
    pub url: String,
    /// Key prefix for quota records
    #[serde(default = "default_redis_prefix")]
    pub key_prefix: String,
}

impl RedisConfig {
    /// Redis config for a URL with the default key prefix
    pub fn with_url<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            key_prefix: default_redis_prefix(),
        }
    }
}

fn default_store_timeout() -> u64 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_redis_prefix() -> String {
    "errexplain:quota:".to_string()
}
