use std::sync::Arc;

use axum::{extract::{Path, State}, response::IntoResponse, Json};
use tracing::info;

use crate::api::dtos::requests::{CreateStaffRequest, UpdateStaffRequest};
use crate::api::extractors::actor::StaffUser;
use crate::domain::models::staff::Staff;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_staff(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.list(false).await?;
    Ok(Json(staff))
}

pub async fn list_all_staff(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.list(true).await?;
    Ok(Json(staff))
}

pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Staff name is required".into()));
    }

    // Performable services must exist in the catalog.
    let service_ids = payload.service_ids.unwrap_or_default();
    for service_id in &service_ids {
        state
            .service_repo
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("Unknown service id: {}", service_id)))?;
    }

    let member = Staff::new(
        payload.name,
        payload.title.unwrap_or_default(),
        payload.email,
        payload.phone,
        &payload.working_hours.unwrap_or_default(),
        &service_ids,
    );

    let created = state.staff_repo.create(&member).await?;
    info!("Staff member created: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn update_staff(
    State(state): State<Arc<AppState>>,
    StaffUser(_): StaffUser,
    Path(staff_id): Path<String>,
    Json(payload): Json<UpdateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut member = state
        .staff_repo
        .find_by_id(&staff_id)
        .await?
        .ok_or(AppError::NotFound("Staff member not found".into()))?;

    if let Some(name) = payload.name {
        member.name = name;
    }
    if let Some(title) = payload.title {
        member.title = title;
    }
    if let Some(email) = payload.email {
        member.email = email;
    }
    if let Some(phone) = payload.phone {
        member.phone = phone;
    }
    if let Some(hours) = payload.working_hours {
        member.working_hours_json = serde_json::to_string(&hours)
            .map_err(|e| AppError::InternalWithMsg(format!("Hours encode error: {}", e)))?;
    }
    if let Some(service_ids) = payload.service_ids {
        for service_id in &service_ids {
            state
                .service_repo
                .find_by_id(service_id)
                .await?
                .ok_or_else(|| {
                    AppError::Validation(format!("Unknown service id: {}", service_id))
                })?;
        }
        member.service_ids_json = serde_json::to_string(&service_ids)
            .map_err(|e| AppError::InternalWithMsg(format!("Service ids encode error: {}", e)))?;
    }
    if let Some(is_active) = payload.is_active {
        member.is_active = is_active;
    }

    let updated = state.staff_repo.update(&member).await?;
    info!("Staff member updated: {}", updated.id);
    Ok(Json(updated))
}
