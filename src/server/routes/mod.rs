//! HTTP route modules
//!
//! Handlers extract the caller identity and inputs, call a service and
//! serialize its result. Failures render through `ExplainError`.

pub mod analyze;
pub mod classify;
pub mod health;
pub mod history;
pub mod quota;
pub mod share;

use crate::utils::error::ExplainError;
use actix_web::web;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data
    pub data: T,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// JSON body extractor settings: size limit and error envelope
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            ExplainError::validation(format!("Invalid request body: {}", err)).into()
        })
}

/// Query string extractor settings
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ExplainError::validation(format!("Invalid query string: {}", err)).into()
    })
}

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    cfg.service(
        web::scope("/api")
            .configure(classify::configure_routes)
            .configure(analyze::configure_routes)
            .configure(quota::configure_routes)
            .configure(history::configure_routes)
            .configure(share::configure_routes),
    );
}
