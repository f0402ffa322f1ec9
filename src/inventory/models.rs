// Inventory data models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::serde_util::double_option;
use crate::validation::validate_non_negative_amount;

/// Stocked part or consumable
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub quantity: i32,
    /// Threshold at or below which the item counts as low stock
    pub low_stock_alert: i32,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an inventory item
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryItem {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Low stock alert cannot be negative"))]
    pub low_stock_alert: Option<i32>,
    #[validate(custom = "validate_non_negative_amount")]
    pub price: Option<Decimal>,
    #[validate(custom = "validate_non_negative_amount")]
    pub cost: Option<Decimal>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
}

/// Request payload for updating an inventory item; all fields optional
///
/// Nullable fields use the omitted/null/value distinction: omitting a field
/// keeps the stored value, an explicit null clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInventoryItem {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Low stock alert cannot be negative"))]
    pub low_stock_alert: Option<i32>,
    #[validate(custom = "validate_non_negative_amount")]
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<Decimal>>,
    #[validate(custom = "validate_non_negative_amount")]
    #[serde(default, deserialize_with = "double_option")]
    pub cost: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub supplier: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sku: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Stock level change: an absolute quantity or a relative adjustment
///
/// At least one field must be present; the adjustment wins when both are
/// supplied. Results below zero clamp to zero.
#[derive(Debug, Deserialize)]
pub struct QuantityChange {
    pub quantity: Option<i32>,
    pub adjustment: Option<i32>,
}

/// Query parameters for listing inventory
#[derive(Debug, Deserialize)]
pub struct InventoryListParams {
    /// Substring match over name, sku, and supplier
    pub search: Option<String>,
    pub category: Option<String>,
    /// When true, only items at or below their low stock threshold
    pub low_stock: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
