// Bicycle data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::serde_util::double_option;

/// Supported bicycle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BicycleType {
    Mountain,
    Road,
    Electric,
    Hybrid,
    Urban,
    Gravel,
    Bmx,
    Children,
}

/// Bicycle database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bicycle {
    pub id: i32,
    pub customer_id: i32,
    pub brand: String,
    pub model: String,
    pub bicycle_type: BicycleType,
    pub color: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bicycle list/detail row joined with the owner's name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BicycleWithOwner {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub brand: String,
    pub model: String,
    pub bicycle_type: BicycleType,
    pub color: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for registering a bicycle
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBicycle {
    pub customer_id: i32,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    pub bicycle_type: BicycleType,
    pub color: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
}

/// Request payload for updating a bicycle; all fields optional
///
/// Nullable fields use the omitted/null/value distinction: omitting a field
/// keeps the stored value, an explicit null clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBicycle {
    pub customer_id: Option<i32>,
    #[validate(length(min = 1, message = "Brand cannot be empty"))]
    pub brand: Option<String>,
    #[validate(length(min = 1, message = "Model cannot be empty"))]
    pub model: Option<String>,
    pub bicycle_type: Option<BicycleType>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for listing bicycles
#[derive(Debug, Deserialize)]
pub struct BicycleListParams {
    pub customer_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bicycle_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BicycleType::Mountain).unwrap(),
            "\"mountain\""
        );
        assert_eq!(serde_json::to_string(&BicycleType::Bmx).unwrap(), "\"bmx\"");
    }

    #[test]
    fn test_unknown_bicycle_type_is_rejected() {
        assert!(serde_json::from_str::<BicycleType>("\"unicycle\"").is_err());
    }
}
