//! Authenticated principal extraction.
//!
//! Authentication itself is out of scope: an upstream auth layer verifies
//! credentials and forwards the principal id in the `x-principal-id` header.
//! This extractor trusts that header; it only checks presence and shape.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

pub const PRINCIPAL_HEADER: &str = "x-principal-id";

/// The authenticated actor performing a request.
#[derive(Debug, Clone, Copy)]
pub struct Principal(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .map(Principal)
            .ok_or((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": "Authentication required" })),
            ))
    }
}
