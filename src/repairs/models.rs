// Repair order data models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::serde_util::double_option;
use crate::validation::validate_non_negative_amount;

/// Repair order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

impl RepairStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Pending => "pending",
            RepairStatus::InProgress => "in_progress",
            RepairStatus::Completed => "completed",
            RepairStatus::Delivered => "delivered",
            RepairStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repair order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Repair order database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RepairOrder {
    pub id: i32,
    pub customer_id: i32,
    pub bicycle_id: i32,
    pub assigned_technician_id: Option<i32>,
    pub issue_description: String,
    pub status: RepairStatus,
    pub priority: Priority,
    pub estimated_completion_date: Option<DateTime<Utc>>,
    /// Set exactly once, on the first transition to completed
    pub completed_date: Option<DateTime<Utc>>,
    pub total_price: Decimal,
    pub notes: Option<String>,
    pub customer_notified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One priced line on a repair order
///
/// price and total_price are copied at creation time so later catalog changes
/// never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RepairOrderItem {
    pub id: i32,
    pub repair_order_id: i32,
    pub operation_id: Option<i32>,
    pub custom_description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repair order list row joined with customer, bicycle, and technician names
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RepairOrderSummary {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub bicycle_id: i32,
    pub bicycle_brand: String,
    pub bicycle_model: String,
    pub assigned_technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub issue_description: String,
    pub status: RepairStatus,
    pub priority: Priority,
    pub estimated_completion_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub total_price: Decimal,
    pub customer_notified: bool,
    pub created_at: DateTime<Utc>,
}

/// Repair order detail response: order plus its line items
#[derive(Debug, Serialize)]
pub struct RepairOrderWithItems {
    #[serde(flatten)]
    pub order: RepairOrder,
    pub items: Vec<RepairOrderItem>,
}

/// One requested line item
///
/// Either an operation reference or a custom description must be present.
/// When price is omitted it defaults to the operation's final_price.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RepairItemRequest {
    pub operation_id: Option<i32>,
    pub custom_description: Option<String>,
    #[validate(custom = "validate_non_negative_amount")]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

/// Request payload for creating a repair order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepairRequest {
    pub customer_id: i32,
    pub bicycle_id: i32,
    #[validate(length(min = 1, message = "Issue description is required"))]
    pub issue_description: String,
    pub priority: Option<Priority>,
    pub assigned_technician_id: Option<i32>,
    pub estimated_completion_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[validate]
    pub items: Option<Vec<RepairItemRequest>>,
}

/// Request payload for updating a repair order
///
/// When items is present, the existing items are replaced wholesale.
/// Nullable fields use the omitted/null/value distinction: omitting a field
/// keeps the stored value, an explicit null clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRepairRequest {
    pub customer_id: Option<i32>,
    pub bicycle_id: Option<i32>,
    #[validate(length(min = 1, message = "Issue description cannot be empty"))]
    pub issue_description: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_technician_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_completion_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[validate]
    pub items: Option<Vec<RepairItemRequest>>,
}

/// Request payload for a status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RepairStatus,
    /// Optional explicit completion date; only honored on the first
    /// transition to completed
    pub completed_date: Option<DateTime<Utc>>,
}

/// Query parameters for listing repair orders
#[derive(Debug, Deserialize)]
pub struct RepairListParams {
    pub status: Option<RepairStatus>,
    pub customer_id: Option<i32>,
    pub technician_id: Option<i32>,
    /// Inclusive ISO 8601 lower bound on created_at
    pub date_from: Option<String>,
    /// Inclusive ISO 8601 upper bound on created_at
    pub date_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RepairStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&RepairStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_status_deserializes_from_wire_format() {
        let status: RepairStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, RepairStatus::InProgress);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<RepairStatus>("\"shipped\"").is_err());
    }
}
