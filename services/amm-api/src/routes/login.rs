use actix_web::{HttpResponse, post, web};
use amm_identity::{Role, authenticate};
use serde::Deserialize;

use crate::routes::common::error_response;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[post("/v1/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> HttpResponse {
    let request = payload.into_inner();
    match authenticate(&request.username, &request.password, request.role) {
        Ok(subject) => HttpResponse::Ok().json(subject),
        Err(err) => error_response(err),
    }
}
