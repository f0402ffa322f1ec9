// HTTP handlers for authentication and user management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::{AuthenticatedUser, RequireAdmin},
    models::{AuthResponse, LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse},
};
use crate::query::{pagination_or, Paginated};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Register a new user
/// POST /api/auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let response = state.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login a user
/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    request
        .validate()
        .map_err(|_| AuthError::InvalidCredentials)?;

    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(response))
}

/// Get current user information (protected endpoint)
/// GET /api/auth/me
pub async fn me_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let response = state.auth_service.get_current_user(user.user_id).await?;
    Ok(Json(response))
}

/// List users (admin only)
/// GET /api/users
pub async fn list_users_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<Paginated<UserResponse>>, AuthError> {
    let (limit, offset) = pagination_or(params.limit, params.offset, 10);
    let page = state.auth_service.list_users(limit, offset).await?;
    Ok(Json(page))
}

/// Get a user by id (admin only)
/// GET /api/users/{id}
pub async fn get_user_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AuthError> {
    let response = state.auth_service.get_user(id).await?;
    Ok(Json(response))
}

/// Update a user (admin only)
/// PUT /api/users/{id}
pub async fn update_user_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let response = state.auth_service.update_user(id, request).await?;
    Ok(Json(response))
}

/// Deactivate a user (admin only)
///
/// Accounts are deactivated rather than deleted so that repair history keeps
/// its technician references.
/// DELETE /api/users/{id}
pub async fn deactivate_user_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AuthError> {
    let response = state.auth_service.deactivate_user(id).await?;
    Ok(Json(response))
}
