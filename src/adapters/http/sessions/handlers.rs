//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{parse_id, request_metadata, session_error_response};
use crate::application::handlers::{
    AcceptSessionCommand, AcceptSessionHandler, CancelSessionCommand, CancelSessionHandler,
    CompleteSessionCommand, CompleteSessionHandler, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler, ListSessionsQuery, RejectSessionCommand, RejectSessionHandler,
    RequestSessionCommand, RequestSessionHandler, WithdrawRequestCommand, WithdrawRequestHandler,
};
use crate::domain::foundation::{PersonId, SessionId, TutorId};
use crate::domain::session::Session;
use crate::ports::Participant;

use super::dto::{
    ListSessionsParams, ReasonRequest, RequestSessionRequest, SessionListResponse,
    SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    pub request: Arc<RequestSessionHandler>,
    pub accept: Arc<AcceptSessionHandler>,
    pub reject: Arc<RejectSessionHandler>,
    pub cancel: Arc<CancelSessionHandler>,
    pub withdraw: Arc<WithdrawRequestHandler>,
    pub complete: Arc<CompleteSessionHandler>,
    pub get: Arc<GetSessionHandler>,
    pub list: Arc<ListSessionsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Student requests a session
pub async fn request_session(
    State(handlers): State<SessionHandlers>,
    headers: HeaderMap,
    Json(req): Json<RequestSessionRequest>,
) -> Response {
    let cmd = RequestSessionCommand {
        subject_id: req.subject_id,
        student_id: req.student_id,
        tutor_id: req.tutor_id,
        scheduled_at: req.scheduled_at,
        description: req.description,
        offered_price: req.offered_price,
    };
    let metadata = request_metadata(&headers).with_actor(req.student_id.to_string());

    match handlers.request.handle(cmd, metadata).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SessionResponse::from(&result.session)),
        )
            .into_response(),
        Err(e) => session_error_response(e),
    }
}

/// GET /api/sessions/:id - Session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id::<SessionId>(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(GetSessionQuery { session_id }).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// POST /api/sessions/:id/accept - Tutor accepts a pending request
pub async fn accept_session(
    State(handlers): State<SessionHandlers>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id::<SessionId>(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AcceptSessionCommand { session_id };
    match handlers.accept.handle(cmd, request_metadata(&headers)).await {
        Ok(result) => ok(&result.session),
        Err(e) => session_error_response(e),
    }
}

/// POST /api/sessions/:id/reject - Tutor rejects a pending request
pub async fn reject_session(
    State(handlers): State<SessionHandlers>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(req): Json<ReasonRequest>,
) -> Response {
    let session_id = match parse_id::<SessionId>(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RejectSessionCommand {
        session_id,
        reason: req.reason,
    };
    match handlers.reject.handle(cmd, request_metadata(&headers)).await {
        Ok(result) => ok(&result.session),
        Err(e) => session_error_response(e),
    }
}

/// POST /api/sessions/:id/cancel - Cancel an accepted session ahead of time
pub async fn cancel_session(
    State(handlers): State<SessionHandlers>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(req): Json<ReasonRequest>,
) -> Response {
    let session_id = match parse_id::<SessionId>(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CancelSessionCommand {
        session_id,
        reason: req.reason,
    };
    match handlers.cancel.handle(cmd, request_metadata(&headers)).await {
        Ok(result) => ok(&result.session),
        Err(e) => session_error_response(e),
    }
}

/// POST /api/sessions/:id/withdraw - Student withdraws a pending request
pub async fn withdraw_request(
    State(handlers): State<SessionHandlers>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id::<SessionId>(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = WithdrawRequestCommand { session_id };
    match handlers.withdraw.handle(cmd, request_metadata(&headers)).await {
        Ok(result) => ok(&result.session),
        Err(e) => session_error_response(e),
    }
}

/// POST /api/sessions/:id/complete - Mark an accepted, past session completed
pub async fn complete_session(
    State(handlers): State<SessionHandlers>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id::<SessionId>(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CompleteSessionCommand { session_id };
    match handlers.complete.handle(cmd, request_metadata(&headers)).await {
        Ok(result) => ok(&result.session),
        Err(e) => session_error_response(e),
    }
}

/// GET /api/students/:id/sessions - Sessions a student requested
pub async fn list_student_sessions(
    State(handlers): State<SessionHandlers>,
    Path(student_id): Path<String>,
    Query(params): Query<ListSessionsParams>,
) -> Response {
    let student_id = match parse_id::<PersonId>(&student_id, "student") {
        Ok(id) => id,
        Err(response) => return response,
    };
    list(&handlers, Participant::Student(student_id), params).await
}

/// GET /api/tutors/:id/sessions - Sessions booked with a tutor
pub async fn list_tutor_sessions(
    State(handlers): State<SessionHandlers>,
    Path(tutor_id): Path<String>,
    Query(params): Query<ListSessionsParams>,
) -> Response {
    let tutor_id = match parse_id::<TutorId>(&tutor_id, "tutor") {
        Ok(id) => id,
        Err(response) => return response,
    };
    list(&handlers, Participant::Tutor(tutor_id), params).await
}

async fn list(
    handlers: &SessionHandlers,
    participant: Participant,
    params: ListSessionsParams,
) -> Response {
    let query = ListSessionsQuery {
        participant,
        state: params.state,
    };

    match handlers.list.handle(query).await {
        Ok(items) => (StatusCode::OK, Json(SessionListResponse::from(items))).into_response(),
        Err(e) => session_error_response(e),
    }
}

fn ok(session: &Session) -> Response {
    (StatusCode::OK, Json(SessionResponse::from(session))).into_response()
}
