//! HTTP handlers for review and eligibility endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{parse_id, request_metadata, review_error_response};
use crate::application::handlers::{
    CheckEligibilityHandler, CheckEligibilityQuery, ListTutorReviewsHandler,
    ListTutorReviewsQuery, SubmitReviewCommand, SubmitReviewHandler,
};
use crate::domain::foundation::{PersonId, TutorId};

use super::dto::{ReviewResponse, SubmitReviewRequest};

#[derive(Clone)]
pub struct ReviewHandlers {
    pub submit: Arc<SubmitReviewHandler>,
    pub eligibility: Arc<CheckEligibilityHandler>,
    pub list: Arc<ListTutorReviewsHandler>,
}

/// POST /api/reviews - Student reviews a completed session
pub async fn submit_review(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Json(req): Json<SubmitReviewRequest>,
) -> Response {
    let metadata = request_metadata(&headers).with_actor(req.student_id.to_string());
    let cmd = SubmitReviewCommand {
        session_id: req.session_id,
        student_id: req.student_id,
        rating: req.rating,
        comment: req.comment,
    };

    match handlers.submit.handle(cmd, metadata).await {
        Ok(result) => (StatusCode::CREATED, Json(ReviewResponse::from(result))).into_response(),
        Err(e) => review_error_response(e),
    }
}

/// GET /api/students/:id/eligibility - Whether the student may book again
pub async fn check_eligibility(
    State(handlers): State<ReviewHandlers>,
    Path(student_id): Path<String>,
) -> Response {
    let student_id = match parse_id::<PersonId>(&student_id, "student") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .eligibility
        .handle(CheckEligibilityQuery { student_id })
        .await
    {
        Ok(eligibility) => (StatusCode::OK, Json(eligibility)).into_response(),
        Err(e) => review_error_response(e),
    }
}

/// GET /api/tutors/:id/reviews - A tutor's reviews and average
pub async fn list_tutor_reviews(
    State(handlers): State<ReviewHandlers>,
    Path(tutor_id): Path<String>,
) -> Response {
    let tutor_id = match parse_id::<TutorId>(&tutor_id, "tutor") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.list.handle(ListTutorReviewsQuery { tutor_id }).await {
        Ok(reviews) => (StatusCode::OK, Json(reviews)).into_response(),
        Err(e) => review_error_response(e),
    }
}
