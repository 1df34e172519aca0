//! Request pipelines
//!
//! Each service composes the core components and the optional stores into
//! one HTTP-facing operation. Routes only extract inputs and serialize the
//! results.

pub mod explain;
pub mod history;
pub mod sharing;
pub mod types;

pub use explain::ExplainService;
pub use history::HistoryService;
pub use sharing::SharingService;
pub use types::*;

use crate::storage::StorageResult;
use crate::utils::error::{ExplainError, Result};
use std::future::Future;
use std::time::Duration;

/// Run a store operation under `timeout`
pub(crate) async fn bounded<T, F>(timeout: Duration, operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = StorageResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(ExplainError::from),
        Err(_) => Err(ExplainError::timeout(format!(
            "{} exceeded {}ms",
            operation,
            timeout.as_millis()
        ))),
    }
}
