//! Storage layer
//!
//! Which stores exist is decided once, from the storage configuration:
//!
//! | mode                 | quota store | submission store |
//! |----------------------|-------------|------------------|
//! | `Local`              | none        | none             |
//! | `Database`           | database    | database         |
//! | `RedisAndDatabase`   | redis       | database         |
//! | `Redis`              | redis       | none             |
//!
//! Without a quota store the quota tracker runs locally; without a
//! submission store history and sharing are disabled.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;
/// Redis quota storage module
#[cfg(feature = "redis")]
pub mod redis;
mod traits;

pub use crate::config::StorageMode;
pub use memory::MemoryStore;
pub use traits::{QuotaStore, StorageError, StorageResult, SubmissionFilter, SubmissionStore};

use crate::config::StorageConfig;
use crate::utils::error::{ExplainError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stores selected for the configured storage mode
#[derive(Clone)]
pub struct StorageLayer {
    /// Resolved mode
    pub mode: StorageMode,
    /// Durable quota records
    pub quota: Option<Arc<dyn QuotaStore>>,
    /// Submission persistence
    pub submissions: Option<Arc<dyn SubmissionStore>>,
    /// Database handle, when configured
    pub database: Option<Arc<database::Database>>,
    /// Redis quota store, when configured
    #[cfg(feature = "redis")]
    pub redis: Option<Arc<redis::RedisQuotaStore>>,
}

impl std::fmt::Debug for StorageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLayer")
            .field("mode", &self.mode)
            .field("quota", &self.quota.as_ref().map(|s| s.name()))
            .field("submissions", &self.submissions.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl StorageLayer {
    /// Connect the configured stores.
    ///
    /// A database that cannot be reached (or migrated) is fatal. Redis that
    /// cannot be reached at startup only warns and is retried per request.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let mode = config.mode();
        info!("Initializing storage layer ({:?})", mode);

        let database = match &config.database {
            Some(db_config) => {
                debug!("Connecting to database");
                Some(Arc::new(database::Database::new(db_config).await?))
            }
            None => None,
        };

        #[cfg(feature = "redis")]
        let redis = match &config.redis {
            Some(redis_config) => {
                debug!("Connecting to Redis");
                let store = redis::RedisQuotaStore::connect(redis_config)
                    .await
                    .map_err(|e| ExplainError::config(format!("Invalid Redis configuration: {}", e)))?;
                Some(Arc::new(store))
            }
            None => None,
        };

        #[cfg(not(feature = "redis"))]
        if config.redis.is_some() {
            warn!("Redis configured but this build has no Redis support, ignoring it");
        }

        #[cfg(feature = "redis")]
        let quota: Option<Arc<dyn QuotaStore>> = match (&redis, &database) {
            (Some(redis), _) => Some(redis.clone() as Arc<dyn QuotaStore>),
            (None, Some(db)) => Some(db.clone() as Arc<dyn QuotaStore>),
            (None, None) => None,
        };
        #[cfg(not(feature = "redis"))]
        let quota: Option<Arc<dyn QuotaStore>> =
            database.clone().map(|db| db as Arc<dyn QuotaStore>);

        let submissions = database
            .clone()
            .map(|db| db as Arc<dyn SubmissionStore>);
        if submissions.is_none() {
            warn!("No database configured, history and sharing are disabled");
        }

        info!("Storage layer initialized successfully");
        Ok(Self {
            mode,
            quota,
            submissions,
            database,
            #[cfg(feature = "redis")]
            redis,
        })
    }

    /// Both concerns backed by one shared in-memory store
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            mode: StorageMode::Database,
            quota: Some(store.clone()),
            submissions: Some(store),
            database: None,
            #[cfg(feature = "redis")]
            redis: None,
        }
    }

    /// No stores at all
    pub fn local() -> Self {
        Self {
            mode: StorageMode::Local,
            quota: None,
            submissions: None,
            database: None,
            #[cfg(feature = "redis")]
            redis: None,
        }
    }

    /// Check every connected store
    pub async fn health_check(&self) -> Result<()> {
        if let Some(db) = &self.database {
            db.health_check().await?;
        }

        #[cfg(feature = "redis")]
        if let Some(redis) = &self.redis {
            redis
                .health_check()
                .await
                .map_err(|e| ExplainError::service_unavailable(format!("Redis: {}", e)))?;
        }

        Ok(())
    }
}

impl From<StorageError> for ExplainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(e) => ExplainError::Database(e),
            #[cfg(feature = "redis")]
            StorageError::Redis(e) => ExplainError::Redis(e),
            other => ExplainError::storage(other.to_string()),
        }
    }
}
