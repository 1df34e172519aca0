//! Per-client analysis quota
//!
//! A rolling window (24 hours by default) caps admitted analyses per client.
//! [`LocalQuotaTracker`] keeps records in process memory; [`DurableQuotaTracker`]
//! keeps them in a [`QuotaStore`](crate::storage::QuotaStore) and falls back to
//! a local tracker whenever the store fails. Which one serves requests is
//! decided once at startup by [`build_tracker`].

mod durable;
mod local;
mod record;
mod types;


pub use durable::DurableQuotaTracker;
pub use local::LocalQuotaTracker;
pub use record::QuotaRecord;
pub use types::{QuotaDecision, QuotaPolicy, QuotaStatus};

use crate::core::clock::SharedClock;
use crate::core::identity::ClientIdentity;
use crate::storage::QuotaStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Quota gate in front of the analyzer
#[async_trait]
pub trait QuotaTracker: Send + Sync {
    /// Atomically admit and record a request, or deny it
    async fn check_and_reserve(&self, client: &ClientIdentity) -> QuotaDecision;

    /// Current status; never consumes quota
    async fn peek(&self, client: &ClientIdentity) -> QuotaStatus;

    /// Applied cap and window
    fn policy(&self) -> &QuotaPolicy;

    /// Backend name for logs and health output
    fn backend(&self) -> &'static str;
}

/// Pick the tracker for the configured storage
pub fn build_tracker(
    store: Option<Arc<dyn QuotaStore>>,
    policy: QuotaPolicy,
    clock: SharedClock,
    timeout: Duration,
) -> Arc<dyn QuotaTracker> {
    match store {
        Some(store) => {
            info!(store = store.name(), "Using durable quota tracking");
            Arc::new(DurableQuotaTracker::new(store, policy, clock, timeout))
        }
        None => {
            info!("No quota store configured, using local quota tracking");
            Arc::new(LocalQuotaTracker::new(policy, clock))
        }
    }
}
