//! Process-local quota tracker

use super::record::QuotaRecord;
use super::types::{QuotaDecision, QuotaPolicy, QuotaStatus};
use super::QuotaTracker;
use crate::core::clock::SharedClock;
use crate::core::identity::ClientIdentity;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory tracker keyed by client identity.
///
/// The `DashMap` entry guard serialises check-and-reserve per key. Records are
/// never evicted; the map lives as long as the process.
#[derive(Clone)]
pub struct LocalQuotaTracker {
    records: Arc<DashMap<String, QuotaRecord>>,
    policy: QuotaPolicy,
    clock: SharedClock,
}

impl LocalQuotaTracker {
    /// Create an empty tracker
    pub fn new(policy: QuotaPolicy, clock: SharedClock) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            policy,
            clock,
        }
    }

    /// Number of tracked clients
    pub fn tracked_clients(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl QuotaTracker for LocalQuotaTracker {
    async fn check_and_reserve(&self, client: &ClientIdentity) -> QuotaDecision {
        let now = self.clock.now();
        let mut record = self
            .records
            .entry(client.as_str().to_string())
            .or_insert_with(|| QuotaRecord::new(client.clone(), now));

        let decision = record.try_admit(now, &self.policy);
        if !decision.allowed {
            debug!(client = %client, "Local quota exhausted");
        }
        decision
    }

    async fn peek(&self, client: &ClientIdentity) -> QuotaStatus {
        let now = self.clock.now();
        match self.records.get(client.as_str()) {
            Some(record) => record.status(now, &self.policy),
            None => QuotaStatus::full(&self.policy, now),
        }
    }

    fn policy(&self) -> &QuotaPolicy {
        &self.policy
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
