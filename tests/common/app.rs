//! Test application wiring

use super::fixtures::StubAnalyzer;
use chrono::{TimeZone, Utc};
use errexplain::config::Config;
use errexplain::core::analysis::Analyzer;
use errexplain::core::clock::ManualClock;
use errexplain::server::AppState;
use errexplain::storage::{MemoryStore, StorageLayer};
use std::sync::Arc;

/// State over stub collaborators, plus handles to inspect them
pub struct TestApp {
    pub state: AppState,
    pub analyzer: StubAnalyzer,
    pub store: MemoryStore,
    pub clock: ManualClock,
}

impl TestApp {
    /// Memory-backed quota and submissions
    pub fn new() -> Self {
        let store = MemoryStore::new();
        Self::build(StorageLayer::in_memory(store.clone()), store)
    }

    /// No stores: local quota, history and sharing disabled
    pub fn local() -> Self {
        Self::build(StorageLayer::local(), MemoryStore::new())
    }

    /// Custom storage layer
    pub fn with_storage(storage: StorageLayer) -> Self {
        Self::build(storage, MemoryStore::new())
    }

    fn build(storage: StorageLayer, store: MemoryStore) -> Self {
        let analyzer = StubAnalyzer::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap());
        let state = AppState::new(
            Config::default(),
            storage,
            Arc::new(analyzer.clone()) as Arc<dyn Analyzer>,
            Arc::new(clock.clone()),
        );
        Self {
            state,
            analyzer,
            store,
            clock,
        }
    }

    /// Actix data handle for `HttpServer::create_app`
    pub fn data(&self) -> actix_web::web::Data<AppState> {
        actix_web::web::Data::new(self.state.clone())
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the service under test
#[macro_export]
macro_rules! init_app {
    ($test_app:expr) => {
        actix_web::test::init_service(errexplain::server::HttpServer::create_app($test_app.data()))
            .await
    };
}
