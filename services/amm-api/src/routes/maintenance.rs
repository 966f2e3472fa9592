use actix_web::{HttpRequest, HttpResponse, get, post, web};
use amm_core::{
    MaintenanceKind, MaintenanceRecord, MaintenanceRecordId, MaintenanceStatus, now_epoch_millis,
};
use amm_identity::Permission;
use amm_storage::MaintenanceRecordRepository;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{bad_request, internal_error, not_found, parse_uuid};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceDraft {
    pub equipment: String,
    pub kind: MaintenanceKind,
    pub date: String,
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub next_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub findings: String,
    #[serde(default)]
    pub actions: String,
}

#[get("/v1/maintenance")]
pub async fn list_maintenance(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMaintenance) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    match MaintenanceRecordRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(mut records) => {
            // History reads newest first.
            records.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
            HttpResponse::Ok().json(records)
        }
        Err(err) => internal_error(err.message),
    }
}

#[get("/v1/maintenance/{id}")]
pub async fn get_maintenance(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ViewMaintenance) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record_id = MaintenanceRecordId::from_uuid(uuid);

    match MaintenanceRecordRepository::get(state.store.as_ref(), record_id).await {
        Ok(Some(record)) => HttpResponse::Ok().json(record),
        Ok(None) => not_found("maintenance record not found"),
        Err(err) => internal_error(err.message),
    }
}

#[post("/v1/maintenance")]
pub async fn create_maintenance(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<MaintenanceDraft>,
) -> HttpResponse {
    let auth = match authorize_request(&req, &state.policy, Permission::ManageMaintenance) {
        Ok(auth) => auth,
        Err(response) => return response,
    };

    let draft = payload.into_inner();
    if draft.equipment.trim().is_empty() {
        return bad_request("equipment is required");
    }

    let now = now_epoch_millis();
    let record = MaintenanceRecord {
        id: MaintenanceRecordId::new(),
        equipment: draft.equipment,
        kind: draft.kind,
        date: draft.date,
        technician: auth.subject.username,
        status: draft.status,
        next_date: draft.next_date,
        description: draft.description,
        findings: draft.findings,
        actions: draft.actions,
        created_at_ms: now,
        updated_at_ms: now,
    };
    match MaintenanceRecordRepository::upsert(state.store.as_ref(), record.clone()).await {
        Ok(()) => HttpResponse::Created().json(record),
        Err(err) => internal_error(err.message),
    }
}
