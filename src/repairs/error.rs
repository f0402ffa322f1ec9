// Error types for repair order operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, error};

/// Error types for repair order operations
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Repair order with id {0} not found")]
    NotFound(i32),

    #[error("Customer with id {0} not found")]
    CustomerNotFound(i32),

    #[error("Bicycle with id {0} not found")]
    BicycleNotFound(i32),

    #[error("Technician with id {0} not found")]
    TechnicianNotFound(i32),

    #[error("Workshop operation with id {0} not found")]
    OperationNotFound(i32),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for RepairError {
    fn from(err: sqlx::Error) -> Self {
        RepairError::DatabaseError(err.to_string())
    }
}

impl RepairError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            RepairError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
            }
            RepairError::NotFound(_)
            | RepairError::CustomerNotFound(_)
            | RepairError::BicycleNotFound(_)
            | RepairError::TechnicianNotFound(_)
            | RepairError::OperationNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            RepairError::InvalidTransition(_) => (StatusCode::BAD_REQUEST, "INVALID_STATE"),
            RepairError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }
}

impl IntoResponse for RepairError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.parts();

        let message = match &self {
            // Internal detail stays in the logs
            RepairError::DatabaseError(msg) => {
                error!("Database error in repairs: {}", msg);
                "A database error occurred".to_string()
            }
            other => {
                debug!("Repair operation failed: {}", other);
                other.to_string()
            }
        };

        let body = Json(json!({
            "error_code": error_code,
            "message": message,
            "timestamp": Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_references_are_404() {
        assert_eq!(RepairError::NotFound(1).parts().0, StatusCode::NOT_FOUND);
        assert_eq!(
            RepairError::CustomerNotFound(2).parts().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RepairError::OperationNotFound(3).parts().0,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_invalid_transition_is_400() {
        let err = RepairError::InvalidTransition("from pending to delivered".to_string());
        assert_eq!(err.parts(), (StatusCode::BAD_REQUEST, "INVALID_STATE"));
    }

    #[test]
    fn test_error_messages_name_the_entity() {
        assert_eq!(
            RepairError::BicycleNotFound(9).to_string(),
            "Bicycle with id 9 not found"
        );
    }
}
