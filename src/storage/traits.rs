//! Store collaborator traits
//!
//! Not-found is never an error: lookups return `Ok(None)` and mutations of a
//! missing row return `Ok(false)`.

use crate::core::identity::ClientIdentity;
use crate::core::quota::{QuotaDecision, QuotaPolicy, QuotaRecord};
use crate::core::submissions::SubmissionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Concurrent update conflict: {0}")]
    Conflict(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Durable quota records keyed by client identity
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Stored record, unpruned
    async fn load(&self, client: &ClientIdentity) -> StorageResult<Option<QuotaRecord>>;

    /// Atomic check-and-reserve at `now`
    async fn reserve(
        &self,
        client: &ClientIdentity,
        now: DateTime<Utc>,
        policy: &QuotaPolicy,
    ) -> StorageResult<QuotaDecision>;
}

/// Filter for listing submissions
#[derive(Debug, Clone)]
pub struct SubmissionFilter {
    /// Owner
    pub client_id: Option<ClientIdentity>,
    /// Created at or after
    pub since: Option<DateTime<Utc>>,
    /// Created at or before
    pub until: Option<DateTime<Utc>>,
    /// Page size
    pub limit: u64,
}

impl SubmissionFilter {
    /// Newest `limit` submissions of `client`
    pub fn for_client(client: &ClientIdentity, limit: u64) -> Self {
        Self {
            client_id: Some(client.clone()),
            since: None,
            until: None,
            limit,
        }
    }

    /// Restrict to a creation-time range
    pub fn between(mut self, since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self.until = until;
        self
    }

    /// Whether `record` passes the filter (limit aside)
    pub fn matches(&self, record: &SubmissionRecord) -> bool {
        self.client_id
            .as_ref()
            .is_none_or(|client| &record.client_id == client)
            && self.since.is_none_or(|since| record.created_at >= since)
            && self.until.is_none_or(|until| record.created_at <= until)
    }
}

/// Submission persistence
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Insert a new record
    async fn create(&self, record: &SubmissionRecord) -> StorageResult<()>;

    /// Record by id
    async fn get(&self, id: &str) -> StorageResult<Option<SubmissionRecord>>;

    /// Record by share id
    async fn find_by_share_id(&self, share_id: &str) -> StorageResult<Option<SubmissionRecord>>;

    /// Mark an unshared record as shared. `Ok(false)` when the record is
    /// missing or was already shared.
    async fn mark_shared(
        &self,
        id: &str,
        share_id: &str,
        shared_at: DateTime<Utc>,
    ) -> StorageResult<bool>;

    /// Records matching `filter`, newest first
    async fn list(&self, filter: &SubmissionFilter) -> StorageResult<Vec<SubmissionRecord>>;

    /// Delete by id; `Ok(false)` when missing
    async fn delete(&self, id: &str) -> StorageResult<bool>;
}
