// HTTP handlers for notification endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::RequireTechnician;
use crate::error::ApiError;
use crate::notifications::models::{
    EmailNotificationRequest, Notification, NotificationListParams, WhatsAppNotificationRequest,
};
use crate::query::Paginated;
use crate::AppState;

/// Send an email notification to a customer
/// POST /api/notifications/email
pub async fn send_email_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(request): Json<EmailNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    request.validate()?;

    let notification = state.notification_service.send_email(request).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Send a WhatsApp notification to a customer
/// POST /api/notifications/whatsapp
pub async fn send_whatsapp_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(request): Json<WhatsAppNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    request.validate()?;

    let notification = state.notification_service.send_whatsapp(request).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// List sent and attempted notifications
/// GET /api/notifications
pub async fn list_notifications_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<NotificationListParams>,
) -> Result<Json<Paginated<Notification>>, ApiError> {
    let page = state.notification_service.list(params).await?;
    Ok(Json(page))
}
