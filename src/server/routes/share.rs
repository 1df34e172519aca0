//! Sharing

use crate::core::identity::ClientIdentity;
use crate::server::state::AppState;
use crate::services::ShareRequest;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;

/// Configure sharing routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/share-error", web::post().to(share_error))
        .route("/shared-error", web::get().to(shared_error));
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedQuery {
    share_id: Option<String>,
}

/// `POST /api/share-error`
async fn share_error(
    state: web::Data<AppState>,
    client: ClientIdentity,
    body: web::Json<ShareRequest>,
) -> ActixResult<HttpResponse> {
    let response = state
        .sharing
        .share(&client, body.error_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// `GET /api/shared-error?shareId=...`
async fn shared_error(
    state: web::Data<AppState>,
    query: web::Query<SharedQuery>,
) -> ActixResult<HttpResponse> {
    let response = state.sharing.get_shared(query.share_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(response))
}
