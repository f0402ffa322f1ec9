// Customer data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::bicycles::models::Bicycle;
use crate::serde_util::double_option;
use crate::validation::validate_phone;

/// Customer database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Full name
    #[schema(example = "Ana García")]
    pub name: String,
    /// Phone number, unique per customer
    #[schema(example = "+34 612 345 678")]
    pub phone: String,
    /// Email address, optional
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a customer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana García")]
    pub name: String,
    #[validate(custom = "validate_phone")]
    #[schema(example = "+34 612 345 678")]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Request payload for updating a customer; all fields optional
///
/// Nullable fields use the omitted/null/value distinction: omitting a field
/// keeps the stored value, an explicit null clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Customer detail response including their registered bicycles
#[derive(Debug, Serialize)]
pub struct CustomerWithBicycles {
    #[serde(flatten)]
    pub customer: Customer,
    pub bicycles: Vec<Bicycle>,
}

/// Query parameters for listing customers
#[derive(Debug, Deserialize)]
pub struct CustomerListParams {
    /// Case-insensitive substring match over name, phone, and email
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// CSV import summary
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub message: String,
    pub imported: usize,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_omitted_nullable_fields() {
        let payload: UpdateCustomer = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert_eq!(payload.notes, None);
        assert_eq!(payload.email, None);
    }

    #[test]
    fn test_update_null_clears_a_nullable_field() {
        let payload: UpdateCustomer =
            serde_json::from_str(r#"{"notes": null, "email": "ana@example.com"}"#).unwrap();
        assert_eq!(payload.notes, Some(None));
        assert_eq!(payload.email, Some(Some("ana@example.com".to_string())));
    }
}
