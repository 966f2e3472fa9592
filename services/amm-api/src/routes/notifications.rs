use actix_web::{HttpRequest, HttpResponse, get, post, web};
use amm_identity::Permission;
use amm_workflow::AssignmentDecision;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::error_response;
use crate::state::AppState;

#[get("/v1/notifications")]
pub async fn list_notifications(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewNotifications) {
        return response;
    }

    match state.lifecycle.pending_notifications().await {
        Ok(notifications) => HttpResponse::Ok().json(notifications),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub decision: AssignmentDecision,
}

#[post("/v1/notifications/{reference}/resolve")]
pub async fn resolve_notification(
    req: HttpRequest,
    state: web::Data<AppState>,
    reference: web::Path<String>,
    payload: web::Json<ResolveRequest>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ResolveAssignments) {
        return response;
    }

    match state
        .lifecycle
        .resolve_assignment(&reference, payload.decision)
        .await
    {
        Ok(mission) => HttpResponse::Ok().json(mission),
        Err(err) => error_response(err),
    }
}
