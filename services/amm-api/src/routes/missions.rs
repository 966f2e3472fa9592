use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use amm_core::MissionStatus;
use amm_identity::Permission;
use amm_storage::MissionRepository;
use amm_workflow::MissionDraft;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{error_response, internal_error, not_found};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub member: Option<String>,
}

#[get("/v1/missions")]
pub async fn list_missions(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMissions) {
        return response;
    }

    if let Some(member) = query.member.as_deref() {
        return match state.lifecycle.missions_for(member).await {
            Ok(missions) => HttpResponse::Ok().json(missions),
            Err(err) => error_response(err),
        };
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    match MissionRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(missions) => HttpResponse::Ok().json(missions),
        Err(err) => internal_error(err.message),
    }
}

#[get("/v1/missions/report-candidates")]
pub async fn report_candidates(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::SubmitMissionReports)
    {
        return response;
    }

    match state.lifecycle.report_candidates().await {
        Ok(missions) => HttpResponse::Ok().json(missions),
        Err(err) => error_response(err),
    }
}

#[get("/v1/missions/{reference}")]
pub async fn get_mission(
    req: HttpRequest,
    state: web::Data<AppState>,
    reference: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMissions) {
        return response;
    }

    match state.store.find_by_reference(&reference).await {
        Ok(Some(mission)) => HttpResponse::Ok().json(mission),
        Ok(None) => not_found("mission not found"),
        Err(err) => internal_error(err.message),
    }
}

#[post("/v1/missions")]
pub async fn create_mission(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<MissionDraft>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageMissions) {
        return response;
    }

    match state.lifecycle.create_mission(payload.into_inner()).await {
        Ok(mission) => HttpResponse::Created().json(mission),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: MissionStatus,
}

#[put("/v1/missions/{reference}/status")]
pub async fn update_mission_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    reference: web::Path<String>,
    payload: web::Json<StatusUpdate>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageMissions) {
        return response;
    }

    match state
        .lifecycle
        .update_status(&reference, payload.status)
        .await
    {
        Ok(mission) => HttpResponse::Ok().json(mission),
        Err(err) => error_response(err),
    }
}

#[delete("/v1/missions/{reference}")]
pub async fn delete_mission(
    req: HttpRequest,
    state: web::Data<AppState>,
    reference: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageMissions) {
        return response;
    }

    let mission = match state.store.find_by_reference(&reference).await {
        Ok(Some(mission)) => mission,
        Ok(None) => return not_found("mission not found"),
        Err(err) => return internal_error(err.message),
    };
    match MissionRepository::delete(state.store.as_ref(), mission.id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => internal_error(err.message),
    }
}
