//! Stores that misbehave on demand

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use errexplain::core::identity::ClientIdentity;
use errexplain::core::quota::{QuotaDecision, QuotaPolicy, QuotaRecord};
use errexplain::core::submissions::SubmissionRecord;
use errexplain::storage::{
    QuotaStore, StorageError, StorageResult, SubmissionFilter, SubmissionStore,
};
use std::time::Duration;

fn unavailable<T>() -> StorageResult<T> {
    Err(StorageError::Unavailable("connection refused".to_string()))
}

/// Every operation fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

#[async_trait]
impl QuotaStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn load(&self, _client: &ClientIdentity) -> StorageResult<Option<QuotaRecord>> {
        unavailable()
    }

    async fn reserve(
        &self,
        _client: &ClientIdentity,
        _now: DateTime<Utc>,
        _policy: &QuotaPolicy,
    ) -> StorageResult<QuotaDecision> {
        unavailable()
    }
}

#[async_trait]
impl SubmissionStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn create(&self, _record: &SubmissionRecord) -> StorageResult<()> {
        unavailable()
    }

    async fn get(&self, _id: &str) -> StorageResult<Option<SubmissionRecord>> {
        unavailable()
    }

    async fn find_by_share_id(&self, _share_id: &str) -> StorageResult<Option<SubmissionRecord>> {
        unavailable()
    }

    async fn mark_shared(
        &self,
        _id: &str,
        _share_id: &str,
        _shared_at: DateTime<Utc>,
    ) -> StorageResult<bool> {
        unavailable()
    }

    async fn list(&self, _filter: &SubmissionFilter) -> StorageResult<Vec<SubmissionRecord>> {
        unavailable()
    }

    async fn delete(&self, _id: &str) -> StorageResult<bool> {
        unavailable()
    }
}

/// Quota store that answers only after `delay`
#[derive(Debug, Clone, Copy)]
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl QuotaStore for SlowStore {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn load(&self, _client: &ClientIdentity) -> StorageResult<Option<QuotaRecord>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn reserve(
        &self,
        client: &ClientIdentity,
        now: DateTime<Utc>,
        policy: &QuotaPolicy,
    ) -> StorageResult<QuotaDecision> {
        tokio::time::sleep(self.delay).await;
        Ok(QuotaRecord::new(client.clone(), now).try_admit(now, policy))
    }
}
