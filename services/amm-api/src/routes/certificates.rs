use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use amm_core::{Certificate, CertificateId, FileAttachment, now_epoch_millis};
use amm_identity::Permission;
use amm_storage::CertificateRepository;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{bad_request, internal_error, not_found, parse_uuid};
use crate::routes::reports::serve_attachment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CertificateDraft {
    pub name: String,
    #[serde(default)]
    pub validation: String,
    #[serde(default)]
    pub acquired: String,
    #[serde(default)]
    pub expires: String,
    pub file: FileAttachment,
}

#[get("/v1/certificates")]
pub async fn list_certificates(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageCertificates) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    match CertificateRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(certificates) => HttpResponse::Ok().json(certificates),
        Err(err) => internal_error(err.message),
    }
}

#[post("/v1/certificates")]
pub async fn create_certificate(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<CertificateDraft>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageCertificates) {
        return response;
    }

    let draft = payload.into_inner();
    if draft.name.trim().is_empty() || draft.file.name.trim().is_empty() {
        return bad_request("certificate name and file are required");
    }

    let now = now_epoch_millis();
    let certificate = Certificate {
        id: CertificateId::new(),
        name: draft.name,
        validation: draft.validation,
        acquired: draft.acquired,
        expires: draft.expires,
        file: draft.file,
        created_at_ms: now,
        updated_at_ms: now,
    };
    match CertificateRepository::upsert(state.store.as_ref(), certificate.clone()).await {
        Ok(()) => HttpResponse::Created().json(certificate),
        Err(err) => internal_error(err.message),
    }
}

#[get("/v1/certificates/{id}/file")]
pub async fn download_certificate(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageCertificates) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let certificate_id = CertificateId::from_uuid(uuid);

    match CertificateRepository::get(state.store.as_ref(), certificate_id).await {
        Ok(Some(certificate)) => serve_attachment(certificate.file),
        Ok(None) => not_found("certificate not found"),
        Err(err) => internal_error(err.message),
    }
}

#[delete("/v1/certificates/{id}")]
pub async fn delete_certificate(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageCertificates) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };

    match CertificateRepository::delete(state.store.as_ref(), CertificateId::from_uuid(uuid)).await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => internal_error(err.message),
    }
}
