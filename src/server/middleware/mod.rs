//! HTTP middleware implementations
//!
//! - Request ID tracking

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
