//! Test database utilities
//!
//! Each test gets an isolated, migrated in-memory SQLite database.

use errexplain::config::DatabaseConfig;
use errexplain::storage::database::Database;
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database; migrations run on connect
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            max_connections: 1, // In-memory DB only supports 1 connection
            ..DatabaseConfig::with_url("sqlite::memory:")
        };

        let db = Database::new(&config)
            .await
            .expect("Failed to create in-memory test database");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }
}
