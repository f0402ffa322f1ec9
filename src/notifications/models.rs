// Notification data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Email,
    Whatsapp,
    Sms,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Email => "email",
            NotificationType::Whatsapp => "whatsapp",
            NotificationType::Sms => "sms",
        }
    }
}

/// Delivery outcome
///
/// Rows start in pending, then move to sent or failed after the single
/// delivery attempt. There is no automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
        }
    }
}

/// Notification database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i32,
    pub customer_id: i32,
    pub repair_order_id: Option<i32>,
    pub notification_type: NotificationType,
    pub message: String,
    pub status: NotificationStatus,
    pub error_message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for sending an email notification
#[derive(Debug, Deserialize, Validate)]
pub struct EmailNotificationRequest {
    pub customer_id: i32,
    pub repair_order_id: Option<i32>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Request payload for sending a WhatsApp notification
#[derive(Debug, Deserialize, Validate)]
pub struct WhatsAppNotificationRequest {
    pub customer_id: i32,
    pub repair_order_id: Option<i32>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Query parameters for listing notifications
#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    pub customer_id: Option<i32>,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
    pub status: Option<NotificationStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
