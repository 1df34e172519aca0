//! Error analysis

use crate::core::identity::ClientIdentity;
use crate::server::state::AppState;
use crate::services::AnalyzeRequest;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Configure analysis routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze-error", web::post().to(analyze_error));
}

/// `POST /api/analyze-error`
async fn analyze_error(
    state: web::Data<AppState>,
    client: ClientIdentity,
    body: web::Json<AnalyzeRequest>,
) -> ActixResult<HttpResponse> {
    debug!(client = %client, "Analyze request");
    let response = state.explain.analyze(&client, &body).await?;
    Ok(HttpResponse::Ok().json(response))
}
