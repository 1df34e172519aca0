//! Rolling-window quota record

use super::types::{QuotaDecision, QuotaPolicy, QuotaStatus};
use crate::core::identity::ClientIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-client request log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaRecord {
    /// Owner
    pub client_id: ClientIdentity,
    /// Admitted request times, oldest first
    pub requests: Vec<DateTime<Utc>>,
    /// Oldest retained request after the last admit, or the creation time
    pub last_reset: DateTime<Utc>,
}

impl QuotaRecord {
    /// Empty record created at `now`
    pub fn new(client_id: ClientIdentity, now: DateTime<Utc>) -> Self {
        Self {
            client_id,
            requests: Vec::new(),
            last_reset: now,
        }
    }

    /// Drop requests that have left the window (`now - t >= window`)
    pub fn prune(&mut self, now: DateTime<Utc>, policy: &QuotaPolicy) {
        self.requests.retain(|t| now.signed_duration_since(*t) < policy.window);
    }

    /// Prune, then admit and record `now` if below the cap.
    ///
    /// Returns the decision; the record is only changed by pruning on deny.
    pub fn try_admit(&mut self, now: DateTime<Utc>, policy: &QuotaPolicy) -> QuotaDecision {
        self.prune(now, policy);

        let retained = self.requests.len() as u32;
        if retained >= policy.max_requests {
            return QuotaDecision {
                allowed: false,
                remaining: 0,
                limit: policy.max_requests,
                reset_time: self.reset_time(now, policy),
            };
        }

        self.requests.push(now);
        self.requests.sort();
        self.last_reset = self.requests.first().copied().unwrap_or(now);

        QuotaDecision {
            allowed: true,
            remaining: policy.max_requests - self.requests.len() as u32,
            limit: policy.max_requests,
            reset_time: self.reset_time(now, policy),
        }
    }

    /// Status as of `now`, without changing the record
    pub fn status(&self, now: DateTime<Utc>, policy: &QuotaPolicy) -> QuotaStatus {
        let mut pruned = self.clone();
        pruned.prune(now, policy);

        if pruned.requests.is_empty() {
            return QuotaStatus::full(policy, now);
        }

        let remaining = policy
            .max_requests
            .saturating_sub(pruned.requests.len() as u32);
        QuotaStatus {
            remaining,
            limit: policy.max_requests,
            reset_time: pruned.reset_time(now, policy),
            can_analyze: remaining > 0,
        }
    }

    fn reset_time(&self, now: DateTime<Utc>, policy: &QuotaPolicy) -> DateTime<Utc> {
        self.requests.first().copied().unwrap_or(now) + policy.window
    }
}
