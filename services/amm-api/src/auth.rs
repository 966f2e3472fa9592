use actix_web::{HttpRequest, HttpResponse};
use amm_identity::{Permission, Role, Subject};
use amm_policy::{PolicyDecision, PolicyEngine, RolePolicy};
use std::str::FromStr;

use crate::routes::common::{bad_request, forbidden, unauthorized};

pub struct AuthInfo {
    pub subject: Subject,
}

/// The identity provider in front of this service is trusted: whatever
/// `(username, role)` pair the headers carry is taken at face value.
pub fn authorize_request(
    req: &HttpRequest,
    engine: &RolePolicy,
    permission: Permission,
) -> Result<AuthInfo, HttpResponse> {
    let username =
        header_value(req, "x-amm-user").ok_or_else(|| unauthorized("missing identity header"))?;
    let role_value =
        header_value(req, "x-amm-role").ok_or_else(|| unauthorized("missing identity header"))?;
    let role = Role::from_str(&role_value).map_err(|_| bad_request("invalid role"))?;

    if username.trim().is_empty() {
        return Err(unauthorized("missing identity header"));
    }

    let subject = Subject::new(username.trim(), role);
    match engine.evaluate(&subject, permission) {
        PolicyDecision::Permit => Ok(AuthInfo { subject }),
        PolicyDecision::Deny => Err(forbidden("permission denied")),
    }
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
