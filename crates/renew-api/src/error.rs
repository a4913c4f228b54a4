//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps resolver, quote, and validation errors to HTTP status codes with a
//! JSON body carrying a machine-readable code and a message.
//!
//! Every license resolution failure, whatever its cause, becomes the same
//! 404 with the message "license not found". Store causes are never
//! returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use renew_quote::QuoteError;
use renew_store::{ResolveError, LICENSE_NOT_FOUND};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Build a body with no details.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body or query could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No authenticated user (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Renewals are switched off by settings (412).
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::PreconditionFailed(_) => (StatusCode::PRECONDITION_FAILED, "RENEWALS_DISABLED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        (status, Json(ErrorBody::new(code, self.to_string()))).into_response()
    }
}

/// Every resolution failure collapses into one user-facing 404.
impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        Self::NotFound(err.user_message().to_string())
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<renew_core::ValidationError> for AppError {
    fn from(err: renew_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use renew_core::{LicenseSelector, UserId};
    use renew_store::StoreError;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (
                AppError::PreconditionFailed("x".into()),
                StatusCode::PRECONDITION_FAILED,
                "RENEWALS_DISABLED",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn error_body_skips_empty_details() {
        let json = serde_json::to_string(&ErrorBody::new("TEST", "test message")).unwrap();
        assert!(json.contains("TEST"));
        assert!(!json.contains("details"));
    }

    #[tokio::test]
    async fn every_resolve_cause_is_the_same_404() {
        let causes = [
            ResolveError::EmptySelector,
            ResolveError::NoMatch {
                user: UserId(1),
                selector: LicenseSelector::default(),
            },
            ResolveError::Store(StoreError::Unavailable("db down".into())),
            ResolveError::Store(StoreError::Timeout { millis: 5 }),
        ];
        for cause in causes {
            let (status, body) = response_parts(AppError::from(cause)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body.error.message, LICENSE_NOT_FOUND);
            assert!(!body.error.message.contains("db down"));
        }
    }

    #[test]
    fn quote_error_is_validation() {
        let err = AppError::from(QuoteError::UnknownDuration(5));
        assert!(matches!(err, AppError::Validation(msg) if msg.contains('5')));
    }

    #[test]
    fn negative_id_is_validation() {
        let err = AppError::from(renew_core::ValidationError::NegativeId {
            kind: "license",
            value: -1,
        });
        assert_eq!(err.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
