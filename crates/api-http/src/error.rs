//! HTTP Error Mapping
//!
//! Maps application errors to status codes and a JSON error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fruits_core::error::AppError;
use serde_json::json;

/// Error kinds reported in the `error` field
pub mod kind {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const TIMEOUT: &str = "timeout";
    pub const STORAGE_ERROR: &str = "storage_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Handler error: an `AppError` rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            AppError::Validation(_) | AppError::Domain(_) => {
                (StatusCode::BAD_REQUEST, kind::BAD_REQUEST)
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, kind::NOT_FOUND),
            AppError::Conflict(_) => (StatusCode::CONFLICT, kind::CONFLICT),
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, kind::TIMEOUT),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, kind::STORAGE_ERROR),
            AppError::Io(_) | AppError::Config(_) | AppError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, kind::INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_kind();
        if self.0.is_client_error() {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        } else {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        }

        let body = Json(json!({
            "error": error,
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}
