//! Submission history

use crate::core::identity::ClientIdentity;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;

/// Configure history routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user-history")
            .route(web::get().to(list_history))
            .route(web::delete().to(delete_history)),
    );
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: Option<String>,
}

/// `GET /api/user-history`
async fn list_history(
    state: web::Data<AppState>,
    client: ClientIdentity,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.history.list(&client).await))
}

/// `DELETE /api/user-history?id=...`
async fn delete_history(
    state: web::Data<AppState>,
    client: ClientIdentity,
    query: web::Query<DeleteQuery>,
) -> ActixResult<HttpResponse> {
    let response = state.history.delete(&client, query.id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(response))
}
