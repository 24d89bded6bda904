use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::services::lifecycle::Actor;
use crate::error::AppError;

const ROLE_HEADER: &str = "x-staff-role";

fn role_from_parts(parts: &Parts) -> Actor {
    match parts
        .headers
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some("admin") => Actor::Admin,
        Some("staff") => Actor::Staff,
        _ => Actor::Customer,
    }
}

/// The acting role for this request. Authentication is handled upstream of
/// this service; the header is the seam where a real auth layer plugs in.
pub struct ActorRole(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for ActorRole {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ActorRole(role_from_parts(parts)))
    }
}

/// Rejects requests that do not carry a staff or admin role.
pub struct StaffUser(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match role_from_parts(parts) {
            Actor::Customer => Err(AppError::Forbidden("Staff access required".into())),
            actor => Ok(StaffUser(actor)),
        }
    }
}

/// Rejects everything but admins; used for the status escape hatch and
/// loyalty program configuration.
pub struct AdminUser;

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match role_from_parts(parts) {
            Actor::Admin => Ok(AdminUser),
            _ => Err(AppError::Forbidden("Admin access required".into())),
        }
    }
}
