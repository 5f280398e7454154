// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::models::ValidationError;
use crate::database::service::ServiceError;
use crate::database::DatabaseError;

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";
pub const VALIDATION_ERRORS: &str = "validation errors";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request. The reason is logged, never returned.
    Validation(ValidationError),

    // 404 Not Found
    RestaurantNotFound,

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RestaurantNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Validation(_) => json!({ "errors": [VALIDATION_ERRORS] }),
            ApiError::RestaurantNotFound => json!({ "error": RESTAURANT_NOT_FOUND }),
            ApiError::Internal(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::warn!("Rejected restaurant_pizza payload: {}", err);
        ApiError::Validation(err)
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Database error: {}", err);
        ApiError::Internal(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => e.into(),
            ServiceError::RestaurantNotFound(_) => ApiError::RestaurantNotFound,
            // No HTTP route deletes pizzas; reaching this is a server bug
            ServiceError::PizzaNotFound(id) => {
                ApiError::Internal(format!("pizza {} not found", id))
            }
            ServiceError::Database(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::RestaurantNotFound => write!(f, "{}", RESTAURANT_NOT_FOUND),
            ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_is_flat_for_every_reason() {
        for reason in [
            ValidationError::MissingField("price"),
            ValidationError::UnknownPizza(4),
            ValidationError::PriceOutOfRange(31),
        ] {
            let err = ApiError::from(reason);
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.to_json(), json!({"errors": ["validation errors"]}));
        }
    }

    #[test]
    fn not_found_body_matches_contract() {
        let err = ApiError::from(ServiceError::RestaurantNotFound(3));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({"error": "Restaurant not found"}));
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(DatabaseError::Migration("disk I/O error".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_json().to_string().contains("disk"));
    }
}
