//! Store-backed quota tracker with a local fallback

use super::local::LocalQuotaTracker;
use super::types::{QuotaDecision, QuotaPolicy, QuotaStatus};
use super::QuotaTracker;
use crate::core::clock::SharedClock;
use crate::core::identity::ClientIdentity;
use crate::storage::{QuotaStore, StorageError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Tracker that keeps quota records in a durable store.
///
/// Every store call is bounded by `timeout`. A store error or timeout is
/// logged and the call is answered by the embedded [`LocalQuotaTracker`],
/// so quota enforcement degrades to per-process during an outage. A write
/// conflict is not an outage: the record is contended, and the request is
/// denied.
pub struct DurableQuotaTracker {
    store: Arc<dyn QuotaStore>,
    fallback: LocalQuotaTracker,
    policy: QuotaPolicy,
    clock: SharedClock,
    timeout: Duration,
}

impl DurableQuotaTracker {
    /// Create a tracker over `store`
    pub fn new(
        store: Arc<dyn QuotaStore>,
        policy: QuotaPolicy,
        clock: SharedClock,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            fallback: LocalQuotaTracker::new(policy, clock.clone()),
            policy,
            clock,
            timeout,
        }
    }

    /// The tracker answering while the store is unavailable
    pub fn fallback(&self) -> &LocalQuotaTracker {
        &self.fallback
    }
}

#[async_trait]
impl QuotaTracker for DurableQuotaTracker {
    async fn check_and_reserve(&self, client: &ClientIdentity) -> QuotaDecision {
        let now = self.clock.now();
        match tokio::time::timeout(self.timeout, self.store.reserve(client, now, &self.policy))
            .await
        {
            Ok(Ok(decision)) => decision,
            Ok(Err(StorageError::Conflict(reason))) => {
                warn!(
                    client = %client,
                    store = self.store.name(),
                    reason = %reason,
                    "Quota record contended past the retry bound, denying"
                );
                let status = self.peek(client).await;
                QuotaDecision {
                    allowed: false,
                    remaining: 0,
                    limit: self.policy.max_requests,
                    reset_time: status.reset_time,
                }
            }
            Ok(Err(e)) => {
                warn!(
                    client = %client,
                    store = self.store.name(),
                    error = %e,
                    "Quota store reserve failed, using local fallback"
                );
                self.fallback.check_and_reserve(client).await
            }
            Err(_) => {
                warn!(
                    client = %client,
                    store = self.store.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Quota store reserve timed out, using local fallback"
                );
                self.fallback.check_and_reserve(client).await
            }
        }
    }

    async fn peek(&self, client: &ClientIdentity) -> QuotaStatus {
        let now = self.clock.now();
        match tokio::time::timeout(self.timeout, self.store.load(client)).await {
            Ok(Ok(Some(record))) => record.status(now, &self.policy),
            Ok(Ok(None)) => QuotaStatus::full(&self.policy, now),
            Ok(Err(e)) => {
                warn!(
                    client = %client,
                    store = self.store.name(),
                    error = %e,
                    "Quota store read failed, using local fallback"
                );
                self.fallback.peek(client).await
            }
            Err(_) => {
                warn!(
                    client = %client,
                    store = self.store.name(),
                    "Quota store read timed out, using local fallback"
                );
                self.fallback.peek(client).await
            }
        }
    }

    fn policy(&self) -> &QuotaPolicy {
        &self.policy
    }

    fn backend(&self) -> &'static str {
        "durable"
    }
}
