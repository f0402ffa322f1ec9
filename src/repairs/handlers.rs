// HTTP handlers for repair order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::RequireTechnician;
use crate::query::Paginated;
use crate::repairs::error::RepairError;
use crate::repairs::models::{
    CreateRepairRequest, RepairListParams, RepairOrder, RepairOrderSummary, RepairOrderWithItems,
    UpdateRepairRequest, UpdateStatusRequest,
};
use crate::AppState;

/// List repair orders with status, customer, technician, and date filters
/// GET /api/repairs
pub async fn list_repairs_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<RepairListParams>,
) -> Result<Json<Paginated<RepairOrderSummary>>, RepairError> {
    let page = state.repair_service.list_repairs(params).await?;
    Ok(Json(page))
}

/// Get a repair order with its items
/// GET /api/repairs/{id}
pub async fn get_repair_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<Json<RepairOrderWithItems>, RepairError> {
    let repair = state.repair_service.get_repair(id).await?;
    Ok(Json(repair))
}

/// Create a repair order with optional line items
/// POST /api/repairs
pub async fn create_repair_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(request): Json<CreateRepairRequest>,
) -> Result<(StatusCode, Json<RepairOrderWithItems>), RepairError> {
    request
        .validate()
        .map_err(|e| RepairError::ValidationError(e.to_string()))?;

    let repair = state.repair_service.create_repair(request).await?;
    Ok((StatusCode::CREATED, Json(repair)))
}

/// Update a repair order; a supplied items array replaces the existing items
/// PUT /api/repairs/{id}
pub async fn update_repair_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRepairRequest>,
) -> Result<Json<RepairOrderWithItems>, RepairError> {
    request
        .validate()
        .map_err(|e| RepairError::ValidationError(e.to_string()))?;

    let repair = state.repair_service.update_repair(id, request).await?;
    Ok(Json(repair))
}

/// Transition a repair order's status
/// PATCH /api/repairs/{id}/status
pub async fn update_status_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<RepairOrder>, RepairError> {
    let order = state.repair_service.update_status(id, request).await?;
    Ok(Json(order))
}

/// Delete a repair order
/// DELETE /api/repairs/{id}
pub async fn delete_repair_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<StatusCode, RepairError> {
    state.repair_service.delete_repair(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
