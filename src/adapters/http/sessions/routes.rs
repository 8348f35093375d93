//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    accept_session, cancel_session, complete_session, get_session, list_student_sessions,
    list_tutor_sessions, reject_session, request_session, withdraw_request, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/api/sessions", post(request_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/accept", post(accept_session))
        .route("/api/sessions/:id/reject", post(reject_session))
        .route("/api/sessions/:id/cancel", post(cancel_session))
        .route("/api/sessions/:id/withdraw", post(withdraw_request))
        .route("/api/sessions/:id/complete", post(complete_session))
        .route("/api/students/:id/sessions", get(list_student_sessions))
        .route("/api/tutors/:id/sessions", get(list_tutor_sessions))
        .with_state(handlers)
}
