//! CoreError to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::common::CoreError;

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CoreError::InvalidFilter(_) | CoreError::InvalidScore(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            CoreError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            CoreError::Internal(e) => {
                error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
