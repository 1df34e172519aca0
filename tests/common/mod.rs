//! Common test utilities for errexplain
//!
//! - In-memory SQLite database support
//! - Stub analyzers and submission fixtures
//! - Stores that fail or stall on demand
//! - A test application wired like the real server

pub mod app;
pub mod database;
pub mod stores;

pub use app::TestApp;
pub use database::TestDatabase;
pub use fixtures::{StubAnalyzer, SubmissionFactory};
pub use stores::{FailingStore, SlowStore};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}
