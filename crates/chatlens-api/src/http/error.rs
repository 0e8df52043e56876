//! Application error type mapping to HTTP status codes and envelope format.

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

use chatlens_types::error::{FormatError, ValidationError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Request body missing a required field or carrying a wrong type.
    Validation(ValidationError),
    /// Strict template substitution failed.
    Format(FormatError),
    /// Body was not acceptable JSON.
    BadRequest(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<FormatError> for AppError {
    fn from(e: FormatError) -> Self {
        AppError::Format(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Format(e) => (StatusCode::BAD_REQUEST, "FORMAT_ERROR", e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

/// Identity and start time of one request, echoed in the error envelope.
#[derive(Debug, Clone, Copy)]
pub struct RequestMeta {
    pub request_id: Uuid,
    pub started: Instant,
}

impl RequestMeta {
    /// Mint a UUIDv7 request id and start the clock.
    pub fn start() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            started: Instant::now(),
        }
    }

    /// Attach this request's meta to an error.
    pub fn reject(&self, error: impl Into<AppError>) -> ApiError {
        ApiError {
            error: error.into(),
            meta: *self,
        }
    }
}

/// An [`AppError`] bound to the request it occurred in.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub meta: RequestMeta,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.error.parts();
        let request_id = self.meta.request_id;

        tracing::debug!(%request_id, code, %message, "Request rejected");

        let body = json!({
            "data": null,
            "meta": {
                "request_id": request_id.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": self.meta.started.elapsed().as_millis() as u64,
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
