//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, PersonId, PolicyViolation, SessionId, SubjectId, TutorId,
    ValidationError,
};

/// Errors raised by session lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Subject not found: {0}")]
    SubjectNotFound(SubjectId),

    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Tutor not found: {0}")]
    TutorNotFound(TutorId),

    /// The requested transition is not legal from the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A business rule beyond the state graph was violated.
    #[error("Policy violation: {0}")]
    PolicyViolation(PolicyViolation),

    /// Another writer changed the session first.
    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// The repository could not durably apply the operation.
    #[error("Persistence failure: {0}")]
    Infrastructure(String),
}

impl SessionError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn policy(violation: PolicyViolation) -> Self {
        SessionError::PolicyViolation(violation)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::SubjectNotFound(_) => ErrorCode::SubjectNotFound,
            SessionError::PersonNotFound(_) => ErrorCode::PersonNotFound,
            SessionError::TutorNotFound(_) => ErrorCode::TutorNotFound,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::PolicyViolation(_) => ErrorCode::PolicyViolation,
            SessionError::Conflict(_) => ErrorCode::ConcurrentModification,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// True for errors a caller can fix; false for persistence failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SessionError::Infrastructure(_))
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => SessionError::InvalidState(err.message),
            ErrorCode::ConcurrentModification => SessionError::Conflict(err.message),
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
