// HTTP handlers for workshop catalog endpoints
// Reads are open to technicians; catalog changes are admin-only

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::{RequireAdmin, RequireTechnician};
use crate::error::ApiError;
use crate::query::Paginated;
use crate::workshop::models::{
    CreateWorkshopOperation, UpdateWorkshopOperation, WorkshopListParams, WorkshopOperation,
};
use crate::workshop::repository;
use crate::AppState;

/// List workshop operations
/// GET /api/workshop/operations
pub async fn list_operations_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<WorkshopListParams>,
) -> Result<Json<Paginated<WorkshopOperation>>, ApiError> {
    let page = repository::list_operations(&state.db, params).await?;
    Ok(Json(page))
}

/// Get a workshop operation by id
/// GET /api/workshop/operations/{id}
pub async fn get_operation_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<Json<WorkshopOperation>, ApiError> {
    let operation = repository::get_operation(&state.db, id).await?;
    Ok(Json(operation))
}

/// Create a workshop operation (admin only)
/// POST /api/workshop/operations
pub async fn create_operation_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<CreateWorkshopOperation>,
) -> Result<(StatusCode, Json<WorkshopOperation>), ApiError> {
    payload.validate()?;

    let operation = repository::create_operation(&state.db, payload).await?;
    tracing::info!(
        "Created workshop operation {} at price {}",
        operation.id,
        operation.final_price
    );
    Ok((StatusCode::CREATED, Json(operation)))
}

/// Update a workshop operation (admin only)
/// PUT /api/workshop/operations/{id}
pub async fn update_operation_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWorkshopOperation>,
) -> Result<Json<WorkshopOperation>, ApiError> {
    payload.validate()?;

    let operation = repository::update_operation(&state.db, id, payload).await?;
    Ok(Json(operation))
}

/// Delete a workshop operation (admin only)
/// DELETE /api/workshop/operations/{id}
pub async fn delete_operation_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    repository::delete_operation(&state.db, id).await?;
    tracing::info!("Deleted workshop operation {}", id);
    Ok(StatusCode::NO_CONTENT)
}
