//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::analysis::Analyzer;
use crate::core::classifier::ErrorClassifier;
use crate::core::clock::SharedClock;
use crate::core::quota::{QuotaPolicy, build_tracker};
use crate::services::{ExplainService, HistoryService, SharingService};
use crate::storage::{StorageLayer, StorageMode};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Built once at startup. The classifier instance inside `explain` serves both
/// the pre-check endpoint and the analysis gate.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Classification, quota and analysis pipeline
    pub explain: ExplainService,
    /// Submission history
    pub history: HistoryService,
    /// Share links
    pub sharing: SharingService,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Quota tracker backend name
    pub quota_backend: &'static str,
    /// Analyzer backend name
    pub analyzer_name: &'static str,
}

impl AppState {
    /// Wire the services for `config` over the given collaborators
    pub fn new(
        config: Config,
        storage: StorageLayer,
        analyzer: Arc<dyn Analyzer>,
        clock: SharedClock,
    ) -> Self {
        let store_timeout = config.storage().operation_timeout();
        let tracker = build_tracker(
            storage.quota.clone(),
            QuotaPolicy::from(config.quota()),
            clock.clone(),
            store_timeout,
        );
        let classifier = Arc::new(ErrorClassifier::new(config.classifier()));

        let explain = ExplainService::new(
            classifier,
            tracker.clone(),
            analyzer.clone(),
            storage.submissions.clone(),
            clock.clone(),
            config.classifier().max_length,
            config.analyzer().timeout(),
            store_timeout,
        );
        let history = HistoryService::new(
            storage.submissions.clone(),
            config.history().page_size,
            clock.clone(),
            store_timeout,
        );
        let sharing = SharingService::new(
            storage.submissions.clone(),
            config.sharing().clone(),
            clock,
            store_timeout,
        );

        Self {
            config: Arc::new(config),
            explain,
            history,
            sharing,
            storage: Arc::new(storage),
            quota_backend: tracker.backend(),
            analyzer_name: analyzer.name(),
        }
    }

    /// Resolved storage mode
    pub fn storage_mode(&self) -> StorageMode {
        self.storage.mode
    }
}
