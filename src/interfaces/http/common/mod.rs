//! Shared HTTP plumbing

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing wrapper around `DomainError`.
///
/// The whole error taxonomy maps to status codes here, in one place:
/// 401 unauthorized, 403 forbidden, 404 not found, 409 conflict,
/// 422 validation, 500 storage.
pub struct ApiError(pub crate::domain::DomainError);

impl From<crate::domain::DomainError> for ApiError {
    fn from(e: crate::domain::DomainError) -> Self {
        Self(e)
    }
}

impl From<validated_json::ValidatedJsonRejection> for ApiError {
    fn from(rejection: validated_json::ValidatedJsonRejection) -> Self {
        Self(crate::domain::DomainError::Validation(rejection.message()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use crate::domain::DomainError::*;

        let (status, message) = match &self.0 {
            Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            Forbidden(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()),
            Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            Database(_) => {
                // Storage failures are logged, never echoed to the caller.
                error!("{}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
