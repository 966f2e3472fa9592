use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use amm_core::{Document, DocumentCategory, DocumentId, FileAttachment, now_epoch_millis};
use amm_identity::Permission;
use amm_storage::DocumentRepository;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{bad_request, internal_error, not_found, parse_uuid};
use crate::routes::reports::serve_attachment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub category: Option<DocumentCategory>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentDraft {
    #[serde(default)]
    pub name: String,
    pub category: DocumentCategory,
    pub file: FileAttachment,
}

#[get("/v1/documents")]
pub async fn list_documents(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageDocuments) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let documents = match DocumentRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(documents) => documents,
        Err(err) => return internal_error(err.message),
    };
    let filtered: Vec<Document> = documents
        .into_iter()
        .filter(|d| query.category.is_none_or(|category| d.category == category))
        .collect();

    HttpResponse::Ok().json(filtered)
}

#[post("/v1/documents")]
pub async fn upload_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<DocumentDraft>,
) -> HttpResponse {
    let auth = match authorize_request(&req, &state.policy, Permission::ManageDocuments) {
        Ok(auth) => auth,
        Err(response) => return response,
    };

    let draft = payload.into_inner();
    if draft.file.name.trim().is_empty() {
        return bad_request("document file is required");
    }
    let name = if draft.name.trim().is_empty() {
        draft.file.name.clone()
    } else {
        draft.name
    };

    let now = now_epoch_millis();
    let document = Document {
        id: DocumentId::new(),
        name,
        category: draft.category,
        file: draft.file,
        uploaded_by: auth.subject.username,
        created_at_ms: now,
        updated_at_ms: now,
    };
    match DocumentRepository::upsert(state.store.as_ref(), document.clone()).await {
        Ok(()) => HttpResponse::Created().json(document),
        Err(err) => internal_error(err.message),
    }
}

#[get("/v1/documents/{id}/file")]
pub async fn download_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageDocuments) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };

    match DocumentRepository::get(state.store.as_ref(), DocumentId::from_uuid(uuid)).await {
        Ok(Some(document)) => serve_attachment(document.file),
        Ok(None) => not_found("document not found"),
        Err(err) => internal_error(err.message),
    }
}

#[delete("/v1/documents/{id}")]
pub async fn delete_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageDocuments) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };

    match DocumentRepository::delete(state.store.as_ref(), DocumentId::from_uuid(uuid)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => internal_error(err.message),
    }
}
