//! API error types and the centralized error-to-response mapping.
//!
//! Every handler returns `Result<_, ApiError>`; nothing reaches the client
//! as a raw store or serialization error.

use std::collections::BTreeMap;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;

/// Error response body. `details` carries per-field messages for
/// validation failures and is omitted otherwise.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<&'static str, String>>,
}

/// A single offending field in a validation failure.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Not-found responses carry no body
            ApiError::NotFound(entity) => {
                tracing::warn!(%entity, "Not found");
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::Validation(fields) => {
                let details = fields
                    .into_iter()
                    .map(|f| (f.field, f.message))
                    .collect::<BTreeMap<_, _>>();
                let body = ErrorBody {
                    error: "Validation failed",
                    details: Some(details),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::MalformedBody(detail) => {
                tracing::debug!(%detail, "Malformed request body");
                let body = ErrorBody {
                    error: "Malformed JSON request",
                    details: None,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                let body = ErrorBody {
                    error: "Internal server error",
                    details: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, .. } => ApiError::NotFound(entity_type),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// JSON extractor whose rejection routes through `ApiError`, so an
/// unparseable body gets the generic malformed-request response instead
/// of axum's plaintext rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::MalformedBody(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_returns_404_with_empty_body() {
        let response = ApiError::NotFound("patient".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn validation_returns_400_with_per_field_details() {
        let response = ApiError::Validation(vec![
            FieldError::new("componentName", "must not be blank"),
            FieldError::new("componentValue", "must not be blank"),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["details"]["componentName"], "must not be blank");
        assert_eq!(json["details"]["componentValue"], "must not be blank");
    }

    #[tokio::test]
    async fn malformed_body_returns_400_generic_message() {
        let response = ApiError::MalformedBody("expected `,` at line 1".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Malformed JSON request");
        // parser detail never leaks to the client
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn internal_returns_500_and_hides_detail() {
        let response = ApiError::Internal("disk full".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn database_not_found_maps_to_404() {
        let api_err: ApiError = DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: 7,
        }
        .into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_database_errors_map_to_500() {
        let api_err: ApiError = DatabaseError::SchemaFailed {
            version: 1,
            reason: "boom".into(),
        }
        .into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
