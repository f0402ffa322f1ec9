// Workshop operation catalog models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::serde_util::double_option;
use crate::validation::{validate_margin, validate_non_negative_amount};

/// A priced service from the workshop catalog (tune-up, brake bleed, ...)
///
/// final_price is always derived from cost and margin; it is never accepted
/// from clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkshopOperation {
    pub id: i32,
    pub name: String,
    /// Free-text duration shown to customers ("45 min", "2 h")
    pub estimated_time: Option<String>,
    /// Machine-usable duration for scheduling
    pub estimated_minutes: Option<i32>,
    pub cost: Decimal,
    /// Margin percentage applied over cost
    pub margin: Decimal,
    pub final_price: Decimal,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a workshop operation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkshopOperation {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub estimated_time: Option<String>,
    pub estimated_minutes: Option<i32>,
    #[validate(custom = "validate_non_negative_amount")]
    pub cost: Decimal,
    /// Defaults to 30% when omitted
    #[validate(custom = "validate_margin")]
    pub margin: Option<Decimal>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// Request payload for updating a workshop operation; all fields optional
///
/// Nullable fields use the omitted/null/value distinction: omitting a field
/// keeps the stored value, an explicit null clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkshopOperation {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_minutes: Option<Option<i32>>,
    #[validate(custom = "validate_non_negative_amount")]
    pub cost: Option<Decimal>,
    #[validate(custom = "validate_margin")]
    pub margin: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub active: Option<bool>,
}

/// Query parameters for listing workshop operations
#[derive(Debug, Deserialize)]
pub struct WorkshopListParams {
    /// When true, only active catalog entries are returned
    pub active: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
