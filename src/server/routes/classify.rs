//! Classifier pre-check

use crate::server::state::AppState;
use crate::services::ClassifyRequest;
use actix_web::{HttpResponse, Result as ActixResult, web};

/// Configure classifier routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/classify", web::post().to(classify));
}

/// `POST /api/classify`
///
/// Same rule set as the analysis gate; never consumes quota.
async fn classify(
    state: web::Data<AppState>,
    body: web::Json<ClassifyRequest>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.explain.precheck(&body)))
}
