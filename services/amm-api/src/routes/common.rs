use actix_web::HttpResponse;
use amm_core::{AmmError, ErrorCode};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn unauthorized(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn conflict(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn internal_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: message.into(),
    })
}

/// One mapping for every controller failure; callers never branch on codes.
pub fn error_response(err: AmmError) -> HttpResponse {
    match err.code {
        ErrorCode::InvalidInput => bad_request(err.message),
        ErrorCode::NotFound => not_found(err.message),
        ErrorCode::DuplicateReference
        | ErrorCode::InsufficientStock
        | ErrorCode::IllegalTransition => conflict(err.message),
        ErrorCode::Unauthorized => unauthorized(err.message),
        ErrorCode::Forbidden => forbidden(err.message),
        ErrorCode::Internal => internal_error(err.message),
    }
}

pub fn parse_uuid(value: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(value).map_err(|_| bad_request("invalid UUID"))
}
