//! Health check endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::StorageMode;
use crate::utils::error::ExplainError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    );
}

/// Liveness
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub storage_mode: StorageMode,
    pub quota_backend: &'static str,
    pub analyzer: &'static str,
}

impl HealthStatus {
    fn from_state(state: &AppState, status: &'static str) -> Self {
        Self {
            status: Cow::Borrowed(status),
            timestamp: chrono::Utc::now(),
            version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
            storage_mode: state.storage_mode(),
            quota_backend: state.quota_backend,
            analyzer: state.analyzer_name,
        }
    }
}

/// Basic health check endpoint
///
/// Reports that the process is up, without touching any store.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");
    Ok(HttpResponse::Ok().json(ApiResponse::success(HealthStatus::from_state(
        &state, "healthy",
    ))))
}

/// Health check that also pings the configured stores
async fn detailed_health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Detailed health check requested");

    if let Err(e) = state.storage.health_check().await {
        warn!("Storage health check failed: {}", e);
        return Err(ExplainError::service_unavailable("Storage unavailable").into());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(HealthStatus::from_state(
        &state, "healthy",
    ))))
}
