use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Quantity must be >= 1")]
    InvalidQuantity { mousepad_id: String, quantity: i64 },

    #[error("Total does not match sum of items")]
    TotalMismatch { declared: f64, computed: f64 },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database not available")]
    StoreUnavailable,

    /// Failure reported by the document store, message kept verbatim.
    #[error("{0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Business-rule violations stay client errors; only store and internal
/// failures become server errors.
impl From<StorefrontError> for AppError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::InvalidQuantity { .. } | StorefrontError::TotalMismatch { .. } => {
                AppError::BadRequest(err.to_string())
            }
            StorefrontError::Validation(errors) => AppError::ValidationError(errors),
            StorefrontError::StoreUnavailable => AppError::ServiceUnavailable(err.to_string()),
            StorefrontError::Database(msg) => AppError::Database(msg),
            StorefrontError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for StorefrontError {
    fn from(err: mongodb::error::Error) -> Self {
        StorefrontError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StorefrontError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StorefrontError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::Internal(err.to_string())
    }
}
