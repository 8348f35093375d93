//! HTTP routes for review endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{check_eligibility, list_tutor_reviews, submit_review, ReviewHandlers};

/// Creates the review router with all endpoints.
pub fn review_routes(handlers: ReviewHandlers) -> Router {
    Router::new()
        .route("/api/reviews", post(submit_review))
        .route("/api/students/:id/eligibility", get(check_eligibility))
        .route("/api/tutors/:id/reviews", get(list_tutor_reviews))
        .with_state(handlers)
}
