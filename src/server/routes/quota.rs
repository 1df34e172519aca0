//! Quota status

use crate::core::identity::ClientIdentity;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};

/// Configure quota routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze-status", web::get().to(analyze_status));
}

/// `GET /api/analyze-status`
async fn analyze_status(
    state: web::Data<AppState>,
    client: ClientIdentity,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.explain.status(&client).await))
}
