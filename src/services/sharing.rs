//! Public share links

use super::bounded;
use super::types::{ShareResponse, SharedErrorResponse};
use crate::config::SharingConfig;
use crate::core::clock::SharedClock;
use crate::core::identity::ClientIdentity;
use crate::storage::SubmissionStore;
use crate::utils::error::{ExplainError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

const NOT_CONFIGURED: &str = "Sharing service not configured";

/// Publishes submissions under share ids
#[derive(Clone)]
pub struct SharingService {
    store: Option<Arc<dyn SubmissionStore>>,
    config: SharingConfig,
    clock: SharedClock,
    timeout: Duration,
}

impl SharingService {
    pub fn new(
        store: Option<Arc<dyn SubmissionStore>>,
        config: SharingConfig,
        clock: SharedClock,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            config,
            clock,
            timeout,
        }
    }

    fn store(&self) -> Result<&Arc<dyn SubmissionStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| ExplainError::service_unavailable(NOT_CONFIGURED))
    }

    fn response(&self, share_id: String) -> ShareResponse {
        ShareResponse {
            success: true,
            share_url: self.config.share_url(&share_id),
            share_id,
        }
    }

    /// Share one of the caller's submissions; idempotent
    pub async fn share(&self, client: &ClientIdentity, error_id: Option<&str>) -> Result<ShareResponse> {
        let error_id = error_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ExplainError::validation("Error ID is required"))?;
        let store = self.store()?;

        let record = bounded(self.timeout, "share lookup", store.get(error_id))
            .await?
            .ok_or_else(|| ExplainError::not_found("Error analysis not found"))?;
        if !record.is_owned_by(client) {
            return Err(ExplainError::forbidden("Unauthorized"));
        }
        if record.is_private {
            return Err(ExplainError::forbidden("Cannot share private error analysis"));
        }
        if let (true, Some(share_id)) = (record.is_shared, record.share_id) {
            return Ok(self.response(share_id));
        }

        let share_id = Uuid::new_v4().simple().to_string();
        let shared_at = self.clock.now();
        if bounded(
            self.timeout,
            "share update",
            store.mark_shared(error_id, &share_id, shared_at),
        )
        .await?
        {
            info!(client = %client, id = error_id, share_id = %share_id, "Submission shared");
            return Ok(self.response(share_id));
        }

        // Lost a race with a concurrent share, or the record went away
        match bounded(self.timeout, "share lookup", store.get(error_id)).await? {
            Some(record) if record.is_shared => record
                .share_id
                .map(|id| self.response(id))
                .ok_or_else(|| ExplainError::internal("Shared submission without share id")),
            _ => Err(ExplainError::not_found("Error analysis not found")),
        }
    }

    /// Public view of a shared submission
    pub async fn get_shared(&self, share_id: Option<&str>) -> Result<SharedErrorResponse> {
        let share_id = share_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ExplainError::validation("Share ID is required"))?;
        let store = self.store()?;

        match bounded(self.timeout, "shared lookup", store.find_by_share_id(share_id)).await? {
            Some(record) if record.is_shared && !record.is_private => Ok(SharedErrorResponse {
                success: true,
                shared: record.shared_view(),
            }),
            _ => Err(ExplainError::not_found("Shared error not found")),
        }
    }
}
