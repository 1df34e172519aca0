//! Redis connection management
//!
//! One multiplexed connection is shared by all callers. It is opened lazily
//! and dropped after a command error so the next call reconnects.

use crate::config::RedisConfig;
use crate::storage::traits::StorageResult;
use crate::utils::sanitize_url;
use parking_lot::RwLock;
use redis::{Client, aio::MultiplexedConnection};
use tracing::{debug, info, warn};

/// Redis client with a cached connection
pub struct RedisPool {
    client: Client,
    connection: RwLock<Option<MultiplexedConnection>>,
    key_prefix: String,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("key_prefix", &self.key_prefix)
            .field("connected", &self.connection.read().is_some())
            .finish()
    }
}

impl RedisPool {
    /// Open a client for `config`. No connection is made yet.
    pub fn new(config: &RedisConfig) -> StorageResult<Self> {
        debug!("Redis URL: {}", sanitize_url(&config.url));
        let client = Client::open(config.url.as_str())?;
        Ok(Self {
            client,
            connection: RwLock::new(None),
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Try to connect now; failure only warns
    pub async fn warm_up(&self) {
        match self.get_connection().await {
            Ok(_) => info!("Redis connection established"),
            Err(e) => warn!("Redis unavailable at startup, will retry per request: {}", e),
        }
    }

    /// Shared connection, opening one if needed
    pub async fn get_connection(&self) -> StorageResult<MultiplexedConnection> {
        if let Some(conn) = self.connection.read().clone() {
            return Ok(conn);
        }

        let conn = self.client.get_multiplexed_async_connection().await?;
        *self.connection.write() = Some(conn.clone());
        Ok(conn)
    }

    /// Forget the cached connection after a failed command
    pub fn invalidate(&self) {
        self.connection.write().take();
    }

    /// Key for a client
    pub fn key(&self, suffix: &str) -> String {
        format!("{}{}", self.key_prefix, suffix)
    }

    /// Health check
    pub async fn health_check(&self) -> StorageResult<()> {
        debug!("Performing Redis health check");
        let mut conn = self.get_connection().await?;
        let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        if let Err(e) = result {
            self.invalidate();
            return Err(e.into());
        }
        debug!("Redis health check passed");
        Ok(())
    }
}
