use std::sync::Arc;

use axum::{extract::{Path, State}, response::IntoResponse, Json};
use tracing::info;

use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::api::extractors::actor::StaffUser;
use crate::domain::models::service::Service;
use crate::error::AppError;
use crate::state::AppState;

/// Customer-facing listing: active services only.
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list(false).await?;
    Ok(Json(services))
}

pub async fn list_all_services(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list(true).await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Service name is required".into()));
    }
    if payload.duration_min <= 0 {
        return Err(AppError::Validation("Duration must be positive".into()));
    }
    if payload.price_cents < 0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }

    let service = Service::new(
        payload.name,
        payload.description.unwrap_or_default(),
        payload.duration_min,
        payload.price_cents,
        payload.category.unwrap_or_else(|| "general".to_string()),
    );

    let created = state.service_repo.create(&service).await?;
    info!("Service created: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(service_id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut service = state
        .service_repo
        .find_by_id(&service_id)
        .await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if let Some(name) = payload.name {
        service.name = name;
    }
    if let Some(description) = payload.description {
        service.description = description;
    }
    if let Some(duration_min) = payload.duration_min {
        if duration_min <= 0 {
            return Err(AppError::Validation("Duration must be positive".into()));
        }
        service.duration_min = duration_min;
    }
    if let Some(price_cents) = payload.price_cents {
        if price_cents < 0 {
            return Err(AppError::Validation("Price must not be negative".into()));
        }
        service.price_cents = price_cents;
    }
    if let Some(category) = payload.category {
        service.category = category;
    }
    if let Some(is_active) = payload.is_active {
        service.is_active = is_active;
    }

    let updated = state.service_repo.update(&service).await?;
    info!("Service updated: {}", updated.id);
    Ok(Json(updated))
}
