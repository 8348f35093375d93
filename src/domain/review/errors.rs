//! Review-specific error types.

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, PersonId, PolicyViolation, SessionId, TutorId, ValidationError,
};

/// Errors raised while submitting or listing reviews.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Tutor not found: {0}")]
    TutorNotFound(TutorId),

    #[error("Policy violation: {0}")]
    PolicyViolation(PolicyViolation),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Persistence failure: {0}")]
    Infrastructure(String),
}

impl ReviewError {
    pub fn policy(violation: PolicyViolation) -> Self {
        ReviewError::PolicyViolation(violation)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            ReviewError::PersonNotFound(_) => ErrorCode::PersonNotFound,
            ReviewError::TutorNotFound(_) => ErrorCode::TutorNotFound,
            ReviewError::PolicyViolation(_) => ErrorCode::PolicyViolation,
            ReviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReviewError::Conflict(_) => ErrorCode::ConcurrentModification,
            ReviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // Unique index on reviews.session_id lost a race.
            ErrorCode::DuplicateReview => {
                ReviewError::PolicyViolation(PolicyViolation::SessionAlreadyReviewed)
            }
            ErrorCode::ConcurrentModification => ReviewError::Conflict(err.message),
            ErrorCode::ValidationFailed => ReviewError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ReviewError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for ReviewError {
    fn from(err: ValidationError) -> Self {
        ReviewError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_review_maps_to_already_reviewed() {
        let err = DomainError::new(ErrorCode::DuplicateReview, "unique violation");
        assert_eq!(
            ReviewError::from(err),
            ReviewError::policy(PolicyViolation::SessionAlreadyReviewed)
        );
    }

    #[test]
    fn out_of_range_rating_is_validation_failure() {
        let err = ValidationError::out_of_range("rating", 1, 5, 7);
        let review_err = ReviewError::from(err);
        assert_eq!(review_err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn database_error_is_infrastructure() {
        let err = ReviewError::from(DomainError::database("timeout"));
        assert!(matches!(err, ReviewError::Infrastructure(_)));
    }
}
