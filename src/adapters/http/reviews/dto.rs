//! HTTP DTOs for review and eligibility endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::SubmitReviewResult;
use crate::domain::foundation::{PersonId, SessionId};

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReviewRequest {
    pub session_id: SessionId,
    pub student_id: PersonId,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// A stored review plus the tutor's refreshed reputation.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub session_id: String,
    pub student_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
    pub tutor_average_rating: Decimal,
    pub tutor_review_count: usize,
}

impl From<SubmitReviewResult> for ReviewResponse {
    fn from(result: SubmitReviewResult) -> Self {
        let review = result.review;
        Self {
            id: review.id().to_string(),
            session_id: review.session_id().to_string(),
            student_id: review.student_id().to_string(),
            rating: review.rating().value(),
            comment: review.comment().to_string(),
            created_at: review.created_at().as_datetime().to_rfc3339(),
            tutor_average_rating: result.tutor_average,
            tutor_review_count: result.tutor_review_count,
        }
    }
}
