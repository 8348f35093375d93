//! Review entity: one rating per completed session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonId, Rating, ReviewId, SessionId, Timestamp};

/// A student's rating of a completed session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    session_id: SessionId,
    student_id: PersonId,
    rating: Rating,
    comment: String,
    created_at: Timestamp,
}

impl Review {
    /// Creates a review. Eligibility rules live in the submit handler.
    pub fn new(
        id: ReviewId,
        session_id: SessionId,
        student_id: PersonId,
        rating: Rating,
        comment: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            student_id,
            rating,
            comment: comment.into().trim().to_string(),
            created_at,
        }
    }

    /// Reconstitute a review from persistence.
    pub fn reconstitute(
        id: ReviewId,
        session_id: SessionId,
        student_id: PersonId,
        rating: Rating,
        comment: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            student_id,
            rating,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> &ReviewId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn student_id(&self) -> &PersonId {
        &self.student_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
