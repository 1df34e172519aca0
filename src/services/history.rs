//! Submission history

use super::bounded;
use super::types::{HistoryResponse, SuccessResponse};
use crate::core::clock::SharedClock;
use crate::core::identity::ClientIdentity;
use crate::core::submissions::HistoryStats;
use crate::storage::{SubmissionFilter, SubmissionStore};
use crate::utils::error::{ExplainError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Lists and deletes a caller's submissions
#[derive(Clone)]
pub struct HistoryService {
    store: Option<Arc<dyn SubmissionStore>>,
    page_size: u64,
    clock: SharedClock,
    timeout: Duration,
}

impl HistoryService {
    pub fn new(
        store: Option<Arc<dyn SubmissionStore>>,
        page_size: u64,
        clock: SharedClock,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            page_size,
            clock,
            timeout,
        }
    }

    /// Newest submissions of `client` with statistics.
    ///
    /// Without a store, or when the read fails, the history is empty.
    pub async fn list(&self, client: &ClientIdentity) -> HistoryResponse {
        let Some(store) = &self.store else {
            return HistoryResponse::empty();
        };

        let filter = SubmissionFilter::for_client(client, self.page_size);
        match bounded(self.timeout, "history read", store.list(&filter)).await {
            Ok(records) => {
                let today = self.clock.now().date_naive();
                HistoryResponse {
                    success: true,
                    history: records.iter().map(|r| r.history_entry()).collect(),
                    stats: HistoryStats::compute(&records, today),
                }
            }
            Err(e) => {
                warn!(client = %client, error = %e, "History read failed");
                HistoryResponse::empty()
            }
        }
    }

    /// Delete one of the caller's submissions
    pub async fn delete(&self, client: &ClientIdentity, id: Option<&str>) -> Result<SuccessResponse> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ExplainError::validation("History ID is required"))?;
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ExplainError::service_unavailable("History service not configured"))?;

        let record = bounded(self.timeout, "history lookup", store.get(id))
            .await?
            .ok_or_else(|| ExplainError::not_found("History entry not found"))?;
        if !record.is_owned_by(client) {
            return Err(ExplainError::forbidden("Unauthorized"));
        }

        if !bounded(self.timeout, "history delete", store.delete(id)).await? {
            return Err(ExplainError::not_found("History entry not found"));
        }
        info!(client = %client, id, "History entry deleted");
        Ok(SuccessResponse { success: true })
    }
}
