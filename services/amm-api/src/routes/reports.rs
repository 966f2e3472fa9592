use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use amm_core::{FileAttachment, MissionReportId};
use amm_identity::Permission;
use amm_storage::MissionReportRepository;
use amm_workflow::{MissionReportDraft, ReviewDecision};
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{bad_request, error_response, internal_error, not_found, parse_uuid};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub mission_ref: String,
    #[serde(flatten)]
    pub draft: MissionReportDraft,
}

#[post("/v1/reports")]
pub async fn submit_report(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<SubmitRequest>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::SubmitMissionReports)
    {
        return response;
    }

    let request = payload.into_inner();
    match state
        .lifecycle
        .submit_report(&request.mission_ref, request.draft)
        .await
    {
        Ok(report) => HttpResponse::Created().json(report),
        Err(err) => error_response(err),
    }
}

#[get("/v1/reports")]
pub async fn list_reports(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMissions) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    match MissionReportRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(err) => internal_error(err.message),
    }
}

#[get("/v1/reports/{id}")]
pub async fn get_report(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMissions) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let report_id = MissionReportId::from_uuid(uuid);

    match MissionReportRepository::get(state.store.as_ref(), report_id).await {
        Ok(Some(report)) => HttpResponse::Ok().json(report),
        Ok(None) => not_found("mission report not found"),
        Err(err) => internal_error(err.message),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: ReviewDecision,
}

#[post("/v1/reports/{id}/review")]
pub async fn review_report(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<ReviewRequest>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ReviewMissionReports)
    {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let report_id = MissionReportId::from_uuid(uuid);

    match state.lifecycle.review_report(report_id, payload.decision).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => error_response(err),
    }
}

#[get("/v1/reports/{id}/attachments/{slot}")]
pub async fn download_attachment(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMissions) {
        return response;
    }
    let (id, slot) = path.into_inner();
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let report_id = MissionReportId::from_uuid(uuid);

    let report = match MissionReportRepository::get(state.store.as_ref(), report_id).await {
        Ok(Some(report)) => report,
        Ok(None) => return not_found("mission report not found"),
        Err(err) => return internal_error(err.message),
    };
    let attachment = match slot.as_str() {
        "flight-profile" => report.flight_profile,
        "report" => report.report_file,
        _ => return bad_request("unknown attachment slot"),
    };
    match attachment {
        Some(file) => serve_attachment(file),
        None => not_found("no attachment in that slot"),
    }
}

/// Stored bytes go back unchanged, named for the browser save dialog.
pub fn serve_attachment(file: FileAttachment) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.name),
        ))
        .body(file.data)
}
