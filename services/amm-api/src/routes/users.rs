use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use amm_core::{AccountStatus, StaffRole, UserAccount, UserId, now_epoch_millis};
use amm_identity::Permission;
use amm_storage::UserRepository;
use serde::Deserialize;

use crate::auth::authorize_request;
use crate::routes::common::{bad_request, internal_error, not_found, parse_uuid};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub staff_role: StaffRole,
    #[serde(default)]
    pub status: AccountStatus,
    pub password: String,
}

#[get("/v1/users")]
pub async fn list_users(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageUsers) {
        return response;
    }

    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let users = match UserRepository::list(state.store.as_ref(), limit, offset).await {
        Ok(users) => users,
        Err(err) => return internal_error(err.message),
    };
    let filtered: Vec<UserAccount> = match query.search.as_deref() {
        Some(needle) => {
            let needle = needle.to_lowercase();
            users
                .into_iter()
                .filter(|u| {
                    u.name.to_lowercase().contains(&needle)
                        || u.email.to_lowercase().contains(&needle)
                        || u.username.to_lowercase().contains(&needle)
                })
                .collect()
        }
        None => users,
    };

    HttpResponse::Ok().json(filtered)
}

#[post("/v1/users")]
pub async fn create_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<UserDraft>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageUsers) {
        return response;
    }

    let draft = payload.into_inner();
    if draft.username.trim().is_empty() {
        return bad_request("username is required");
    }

    let now = now_epoch_millis();
    let user = UserAccount {
        id: UserId::new(),
        name: draft.name,
        username: draft.username,
        email: draft.email,
        staff_role: draft.staff_role,
        status: draft.status,
        password: draft.password,
        created_at_ms: now,
        updated_at_ms: now,
    };
    match UserRepository::upsert(state.store.as_ref(), user.clone()).await {
        Ok(()) => HttpResponse::Created().json(user),
        Err(err) => internal_error(err.message),
    }
}

#[put("/v1/users/{id}")]
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<UserDraft>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageUsers) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let user_id = UserId::from_uuid(uuid);

    let mut user = match UserRepository::get(state.store.as_ref(), user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return not_found("user not found"),
        Err(err) => return internal_error(err.message),
    };
    let draft = payload.into_inner();
    user.name = draft.name;
    user.username = draft.username;
    user.email = draft.email;
    user.staff_role = draft.staff_role;
    user.status = draft.status;
    user.password = draft.password;
    user.updated_at_ms = now_epoch_millis();

    match UserRepository::upsert(state.store.as_ref(), user.clone()).await {
        Ok(()) => HttpResponse::Ok().json(user),
        Err(err) => internal_error(err.message),
    }
}

#[delete("/v1/users/{id}")]
pub async fn delete_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ManageUsers) {
        return response;
    }
    let uuid = match parse_uuid(&id) {
        Ok(value) => value,
        Err(response) => return response,
    };

    match UserRepository::delete(state.store.as_ref(), UserId::from_uuid(uuid)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => internal_error(err.message),
    }
}
