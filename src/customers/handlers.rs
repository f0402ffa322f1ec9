// HTTP handlers for customer endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::RequireTechnician;
use crate::customers::models::{
    CreateCustomer, Customer, CustomerListParams, CustomerWithBicycles, UpdateCustomer,
};
use crate::customers::repository;
use crate::error::ApiError;
use crate::query::Paginated;
use crate::AppState;

/// List customers with optional search and pagination
/// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    params(
        ("search" = Option<String>, Query, description = "Substring match over name, phone, and email"),
        ("limit" = Option<i64>, Query, description = "Page size, defaults to 10"),
        ("offset" = Option<i64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Paginated list of customers"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn list_customers_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<Paginated<Customer>>, ApiError> {
    tracing::debug!("Listing customers with params: {:?}", params);
    let page = repository::list_customers(&state.db, params).await?;
    Ok(Json(page))
}

/// Get a customer and their bicycles
/// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer with bicycles"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn get_customer_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<Json<CustomerWithBicycles>, ApiError> {
    let customer = repository::get_customer_with_bicycles(&state.db, id).await?;
    Ok(Json(customer))
}

/// Create a new customer
/// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Validation failure or duplicate phone")
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn create_customer_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(payload): Json<CreateCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    payload.validate()?;

    let customer = repository::create_customer(&state.db, payload).await?;
    tracing::info!("Created customer {}", customer.id);
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Update a customer
/// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Validation failure or duplicate phone"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn update_customer_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomer>,
) -> Result<Json<Customer>, ApiError> {
    payload.validate()?;

    let customer = repository::update_customer(&state.db, id, payload).await?;
    Ok(Json(customer))
}

/// Delete a customer and, via cascade, their bicycles and repair orders
/// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "customers"
)]
pub async fn delete_customer_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    repository::delete_customer(&state.db, id).await?;
    tracing::info!("Deleted customer {}", id);
    Ok(StatusCode::NO_CONTENT)
}
