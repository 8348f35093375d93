//! Review and reputation events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, PersonId, Rating, ReviewId, SessionId, Timestamp, TutorId,
};

use super::Review;

/// Published when a student reviews a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmitted {
    pub event_id: EventId,
    pub review_id: ReviewId,
    pub session_id: SessionId,
    pub student_id: PersonId,
    pub tutor_id: TutorId,
    pub rating: Rating,
    pub submitted_at: Timestamp,
}

domain_event!(
    ReviewSubmitted,
    event_type = "review.submitted.v1",
    aggregate_id = review_id,
    aggregate_type = "Review",
    occurred_at = submitted_at,
    event_id = event_id
);

impl ReviewSubmitted {
    pub fn from_review(review: &Review, tutor_id: TutorId) -> Self {
        Self {
            event_id: EventId::new(),
            review_id: *review.id(),
            session_id: *review.session_id(),
            student_id: *review.student_id(),
            tutor_id,
            rating: review.rating(),
            submitted_at: *review.created_at(),
        }
    }
}

/// Published after a tutor's average rating is recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorRatingRecalculated {
    pub event_id: EventId,
    pub tutor_id: TutorId,
    pub previous_average: Decimal,
    pub average_rating: Decimal,
    pub review_count: usize,
    pub recalculated_at: Timestamp,
}

domain_event!(
    TutorRatingRecalculated,
    event_type = "tutor.rating_recalculated.v1",
    aggregate_id = tutor_id,
    aggregate_type = "TutorProfile",
    occurred_at = recalculated_at,
    event_id = event_id
);
