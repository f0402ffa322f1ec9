// HTTP handlers for bicycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::RequireTechnician;
use crate::bicycles::models::{
    Bicycle, BicycleListParams, BicycleWithOwner, CreateBicycle, UpdateBicycle,
};
use crate::bicycles::repository;
use crate::error::ApiError;
use crate::query::Paginated;
use crate::AppState;

/// List bicycles, optionally filtered by owner
/// GET /api/bicycles
pub async fn list_bicycles_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<BicycleListParams>,
) -> Result<Json<Paginated<BicycleWithOwner>>, ApiError> {
    let page = repository::list_bicycles(&state.db, params).await?;
    Ok(Json(page))
}

/// Get a bicycle by id
/// GET /api/bicycles/{id}
pub async fn get_bicycle_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<Json<BicycleWithOwner>, ApiError> {
    let bicycle = repository::get_bicycle(&state.db, id).await?;
    Ok(Json(bicycle))
}

/// Register a new bicycle
/// POST /api/bicycles
pub async fn create_bicycle_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(payload): Json<CreateBicycle>,
) -> Result<(StatusCode, Json<Bicycle>), ApiError> {
    payload.validate()?;

    let bicycle = repository::create_bicycle(&state.db, payload).await?;
    tracing::info!(
        "Registered bicycle {} for customer {}",
        bicycle.id,
        bicycle.customer_id
    );
    Ok((StatusCode::CREATED, Json(bicycle)))
}

/// Update a bicycle
/// PUT /api/bicycles/{id}
pub async fn update_bicycle_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBicycle>,
) -> Result<Json<Bicycle>, ApiError> {
    payload.validate()?;

    let bicycle = repository::update_bicycle(&state.db, id, payload).await?;
    Ok(Json(bicycle))
}

/// Delete a bicycle
/// DELETE /api/bicycles/{id}
pub async fn delete_bicycle_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    repository::delete_bicycle(&state.db, id).await?;
    tracing::info!("Deleted bicycle {}", id);
    Ok(StatusCode::NO_CONTENT)
}
