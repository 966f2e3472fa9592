use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use amm_core::{
    ProblemPriority, ProblemReport, ProblemReportId, ProblemStatus, now_epoch_millis,
};
use amm_identity::Permission;
use amm_storage::ProblemReportRepository;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{bad_request, internal_error, not_found, parse_uuid};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<ProblemStatus>,
    pub airport: Option<String>,
    pub reporter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProblemDraft {
    pub airport: String,
    pub system: String,
    pub priority: ProblemPriority,
    pub reporter: String,
    pub contact: String,
    pub date: String,
    pub description: String,
    pub impact: String,
    #[serde(default)]
    pub additional_info: String,
}

#[get("/v1/problems")]
pub async fn list_problems(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewProblems) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let problems = match ProblemReportRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(problems) => problems,
        Err(err) => return internal_error(err.message),
    };
    let filtered: Vec<ProblemReport> = problems
        .into_iter()
        .filter(|p| query.status.is_none_or(|status| p.status == status))
        .filter(|p| {
            query
                .airport
                .as_deref()
                .is_none_or(|airport| p.airport.to_lowercase().contains(&airport.to_lowercase()))
        })
        .filter(|p| {
            query
                .reporter
                .as_deref()
                .is_none_or(|reporter| p.reporter == reporter)
        })
        .collect();

    HttpResponse::Ok().json(filtered)
}

#[get("/v1/problems/{id}")]
pub async fn get_problem(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewProblems) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let problem_id = ProblemReportId::from_uuid(uuid);

    match ProblemReportRepository::get(state.store.as_ref(), problem_id).await {
        Ok(Some(problem)) => HttpResponse::Ok().json(problem),
        Ok(None) => not_found("problem report not found"),
        Err(err) => internal_error(err.message),
    }
}

#[post("/v1/problems")]
pub async fn create_problem(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<ProblemDraft>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ReportProblems) {
        return response;
    }

    let draft = payload.into_inner();
    if draft.airport.trim().is_empty() || draft.system.trim().is_empty() {
        return bad_request("airport and system are required");
    }

    let now = now_epoch_millis();
    let problem = ProblemReport {
        id: ProblemReportId::new(),
        airport: draft.airport,
        system: draft.system,
        priority: draft.priority,
        reporter: draft.reporter,
        contact: draft.contact,
        date: draft.date,
        description: draft.description,
        impact: draft.impact,
        additional_info: draft.additional_info,
        status: ProblemStatus::New,
        created_at_ms: now,
        updated_at_ms: now,
    };
    match ProblemReportRepository::upsert(state.store.as_ref(), problem.clone()).await {
        Ok(()) => HttpResponse::Created().json(problem),
        Err(err) => internal_error(err.message),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ProblemStatus,
}

#[put("/v1/problems/{id}/status")]
pub async fn update_problem_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<StatusUpdate>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::UpdateProblemStatus) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let problem_id = ProblemReportId::from_uuid(uuid);

    let mut problem = match ProblemReportRepository::get(state.store.as_ref(), problem_id).await {
        Ok(Some(problem)) => problem,
        Ok(None) => return not_found("problem report not found"),
        Err(err) => return internal_error(err.message),
    };
    problem.status = payload.status;
    problem.updated_at_ms = now_epoch_millis();
    match ProblemReportRepository::upsert(state.store.as_ref(), problem.clone()).await {
        Ok(()) => HttpResponse::Ok().json(problem),
        Err(err) => internal_error(err.message),
    }
}
