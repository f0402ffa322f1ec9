// HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::RequireTechnician;
use crate::error::ApiError;
use crate::inventory::models::{
    CreateInventoryItem, InventoryItem, InventoryListParams, QuantityChange, UpdateInventoryItem,
};
use crate::inventory::repository;
use crate::query::Paginated;
use crate::AppState;

/// List inventory items with search and stock filters
/// GET /api/inventory
pub async fn list_items_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<InventoryListParams>,
) -> Result<Json<Paginated<InventoryItem>>, ApiError> {
    let page = repository::list_items(&state.db, params).await?;
    Ok(Json(page))
}

/// Get an inventory item by id
/// GET /api/inventory/{id}
pub async fn get_item_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = repository::get_item(&state.db, id).await?;
    Ok(Json(item))
}

/// Create an inventory item
/// POST /api/inventory
pub async fn create_item_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(payload): Json<CreateInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    payload.validate()?;

    let item = repository::create_item(&state.db, payload).await?;
    tracing::info!("Created inventory item {}", item.id);
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item
/// PUT /api/inventory/{id}
pub async fn update_item_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInventoryItem>,
) -> Result<Json<InventoryItem>, ApiError> {
    payload.validate()?;

    let item = repository::update_item(&state.db, id, payload).await?;
    Ok(Json(item))
}

/// Set or adjust stock for an item
/// PATCH /api/inventory/{id}/quantity
pub async fn change_quantity_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(change): Json<QuantityChange>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = repository::change_quantity(&state.db, id, change).await?;
    Ok(Json(item))
}

/// Delete an inventory item
/// DELETE /api/inventory/{id}
pub async fn delete_item_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    repository::delete_item(&state.db, id).await?;
    tracing::info!("Deleted inventory item {}", id);
    Ok(StatusCode::NO_CONTENT)
}
