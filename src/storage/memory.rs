//! In-memory store
//!
//! Implements both store traits over process memory. Used by tests and for
//! running the full HTTP surface without a database.

use super::traits::{QuotaStore, StorageResult, SubmissionFilter, SubmissionStore};
use crate::core::identity::ClientIdentity;
use crate::core::quota::{QuotaDecision, QuotaPolicy, QuotaRecord};
use crate::core::submissions::SubmissionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Memory-backed quota and submission store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    quotas: Arc<DashMap<String, QuotaRecord>>,
    submissions: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a quota record (test setup)
    pub fn put_quota_record(&self, record: QuotaRecord) {
        self.quotas
            .insert(record.client_id.as_str().to_string(), record);
    }

    /// Number of stored submissions
    pub fn submission_count(&self) -> usize {
        self.submissions.read().len()
    }
}

#[async_trait]
impl QuotaStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, client: &ClientIdentity) -> StorageResult<Option<QuotaRecord>> {
        Ok(self.quotas.get(client.as_str()).map(|r| r.clone()))
    }

    async fn reserve(
        &self,
        client: &ClientIdentity,
        now: DateTime<Utc>,
        policy: &QuotaPolicy,
    ) -> StorageResult<QuotaDecision> {
        let mut record = self
            .quotas
            .entry(client.as_str().to_string())
            .or_insert_with(|| QuotaRecord::new(client.clone(), now));
        Ok(record.try_admit(now, policy))
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, record: &SubmissionRecord) -> StorageResult<()> {
        self.submissions.write().push(record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<SubmissionRecord>> {
        Ok(self.submissions.read().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_share_id(&self, share_id: &str) -> StorageResult<Option<SubmissionRecord>> {
        Ok(self
            .submissions
            .read()
            .iter()
            .find(|r| r.share_id.as_deref() == Some(share_id))
            .cloned())
    }

    async fn mark_shared(
        &self,
        id: &str,
        share_id: &str,
        shared_at: DateTime<Utc>,
    ) -> StorageResult<bool> {
        let mut submissions = self.submissions.write();
        match submissions.iter_mut().find(|r| r.id == id && !r.is_shared) {
            Some(record) => {
                record.is_shared = true;
                record.share_id = Some(share_id.to_string());
                record.shared_at = Some(shared_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, filter: &SubmissionFilter) -> StorageResult<Vec<SubmissionRecord>> {
        let mut matching: Vec<SubmissionRecord> = self
            .submissions
            .read()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(filter.limit as usize);
        Ok(matching)
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut submissions = self.submissions.write();
        let before = submissions.len();
        submissions.retain(|r| r.id != id);
        Ok(submissions.len() != before)
    }
}
