//! Error responses shared by every HTTP module.
//!
//! | Error kind | Status |
//! |---|---|
//! | not found (session, subject, person, tutor) | 404 |
//! | invalid state transition | 409 |
//! | concurrent modification | 409 |
//! | policy violation | 422 |
//! | validation failure, malformed id | 400 |
//! | persistence failure | 500 |

use std::str::FromStr;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::domain::foundation::{CommandMetadata, PolicyViolation};
use crate::domain::review::ReviewError;
use crate::domain::session::SessionError;

/// Header a caller may set to correlate its request with emitted events.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new("INVALID_STATE", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn policy(violation: PolicyViolation) -> Self {
        Self {
            details: Some(json!({ "rule": violation.code() })),
            ..Self::new("POLICY_VIOLATION", violation.message())
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self {
            details: Some(json!({ "field": field })),
            ..Self::new("VALIDATION_FAILED", message)
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Parses a path identifier, answering 400 when it is not a UUID.
pub(crate) fn parse_id<T: FromStr>(raw: &str, resource_type: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        ErrorResponse::bad_request(format!("Invalid {} ID: {}", resource_type, raw))
            .with_status(StatusCode::BAD_REQUEST)
    })
}

/// Command metadata for an HTTP request, carrying the caller's correlation id
/// or a fresh one.
pub(crate) fn request_metadata(headers: &HeaderMap) -> CommandMetadata {
    let correlation_id = headers
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    CommandMetadata::new("http").with_correlation_id(correlation_id)
}

pub(crate) fn session_error_response(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => {
            ErrorResponse::not_found("Session", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        SessionError::SubjectNotFound(id) => {
            ErrorResponse::not_found("Subject", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        SessionError::PersonNotFound(id) => {
            ErrorResponse::not_found("Person", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        SessionError::TutorNotFound(id) => {
            ErrorResponse::not_found("Tutor", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        SessionError::InvalidState(msg) => {
            ErrorResponse::invalid_state(msg).with_status(StatusCode::CONFLICT)
        }
        SessionError::Conflict(msg) => ErrorResponse::conflict(msg).with_status(StatusCode::CONFLICT),
        SessionError::PolicyViolation(violation) => {
            ErrorResponse::policy(violation).with_status(StatusCode::UNPROCESSABLE_ENTITY)
        }
        SessionError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).with_status(StatusCode::BAD_REQUEST)
        }
        SessionError::Infrastructure(msg) => internal_error(msg),
    }
}

pub(crate) fn review_error_response(error: ReviewError) -> Response {
    match error {
        ReviewError::SessionNotFound(id) => {
            ErrorResponse::not_found("Session", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        ReviewError::PersonNotFound(id) => {
            ErrorResponse::not_found("Person", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        ReviewError::TutorNotFound(id) => {
            ErrorResponse::not_found("Tutor", &id.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        ReviewError::PolicyViolation(violation) => {
            ErrorResponse::policy(violation).with_status(StatusCode::UNPROCESSABLE_ENTITY)
        }
        ReviewError::ValidationFailed { field, message } => {
            ErrorResponse::validation(&field, message).with_status(StatusCode::BAD_REQUEST)
        }
        ReviewError::Conflict(msg) => ErrorResponse::conflict(msg).with_status(StatusCode::CONFLICT),
        ReviewError::Infrastructure(msg) => internal_error(msg),
    }
}

fn internal_error(msg: String) -> Response {
    tracing::error!(error = %msg, "request failed with persistence error");
    ErrorResponse::internal("internal server error").with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
