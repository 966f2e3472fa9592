use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use amm_core::PartId;
use amm_identity::Permission;
use amm_storage::SparePartRepository;
use amm_workflow::{PartDraft, UsageRequest};
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{error_response, internal_error, parse_uuid};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[get("/v1/parts")]
pub async fn list_parts(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::RecordPartUsage) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    match SparePartRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(parts) => HttpResponse::Ok().json(parts),
        Err(err) => internal_error(err.message),
    }
}

#[get("/v1/parts/low-stock")]
pub async fn low_stock(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::RecordPartUsage) {
        return response;
    }

    match state.inventory.low_stock_report().await {
        Ok(parts) => HttpResponse::Ok().json(parts),
        Err(err) => error_response(err),
    }
}

#[get("/v1/parts/usage")]
pub async fn usage_history(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::RecordPartUsage) {
        return response;
    }

    match state.inventory.usage_history().await {
        Ok(usage) => HttpResponse::Ok().json(usage),
        Err(err) => error_response(err),
    }
}

#[post("/v1/parts")]
pub async fn upsert_part(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<PartDraft>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageInventory) {
        return response;
    }

    match state.inventory.upsert_part(payload.into_inner()).await {
        Ok(part) => HttpResponse::Ok().json(part),
        Err(err) => error_response(err),
    }
}

#[post("/v1/parts/use")]
pub async fn use_parts(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<UsageRequest>,
) -> HttpResponse {
    let auth = match authorize_request(&req, &state.policy, Permission::RecordPartUsage) {
        Ok(auth) => auth,
        Err(response) => return response,
    };

    match state
        .inventory
        .use_parts(payload.into_inner(), &auth.subject.username)
        .await
    {
        Ok(usage) => HttpResponse::Ok().json(usage),
        Err(err) => error_response(err),
    }
}

#[delete("/v1/parts/{id}")]
pub async fn delete_part(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageInventory) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };

    match SparePartRepository::delete(state.store.as_ref(), PartId::from_uuid(uuid)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => internal_error(err.message),
    }
}
