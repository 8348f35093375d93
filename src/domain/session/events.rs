//! Session domain events.
//!
//! One event per applied transition:
//! - `SessionRequested` - student proposed a session
//! - `SessionAccepted` - tutor accepted it
//! - `SessionRejected` - tutor rejected it
//! - `SessionCancelled` - accepted session cancelled or pending request withdrawn
//! - `SessionCompleted` - completed by hand or by the overdue sweep

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, Money, PersonId, SessionId, SubjectId, Timestamp, TutorId,
};

use super::{Session, SessionState};

// ════════════════════════════════════════════════════════════════════════════
// SessionRequested
// ════════════════════════════════════════════════════════════════════════════

/// Published when a student requests a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequested {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub subject_id: SubjectId,
    pub student_id: PersonId,
    pub tutor_id: TutorId,
    pub scheduled_at: Timestamp,
    pub offered_price: Money,
    pub requested_at: Timestamp,
}

domain_event!(
    SessionRequested,
    event_type = "session.requested.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = requested_at,
    event_id = event_id
);

impl SessionRequested {
    pub fn from_session(session: &Session) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            subject_id: *session.subject_id(),
            student_id: *session.student_id(),
            tutor_id: *session.tutor_id(),
            scheduled_at: *session.scheduled_at(),
            offered_price: session.offered_price(),
            requested_at: *session.requested_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionAccepted
// ════════════════════════════════════════════════════════════════════════════

/// Published when the tutor accepts a pending request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAccepted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tutor_id: TutorId,
    pub accepted_at: Timestamp,
}

domain_event!(
    SessionAccepted,
    event_type = "session.accepted.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = accepted_at,
    event_id = event_id
);

impl SessionAccepted {
    pub fn from_session(session: &Session) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            tutor_id: *session.tutor_id(),
            accepted_at: *session.updated_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionRejected
// ════════════════════════════════════════════════════════════════════════════

/// Published when the tutor rejects a pending request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRejected {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tutor_id: TutorId,
    pub reason: String,
    pub rejected_at: Timestamp,
}

domain_event!(
    SessionRejected,
    event_type = "session.rejected.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = rejected_at,
    event_id = event_id
);

impl SessionRejected {
    pub fn from_session(session: &Session) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            tutor_id: *session.tutor_id(),
            reason: session.rejection_reason().unwrap_or_default().to_string(),
            rejected_at: *session.updated_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session is cancelled.
///
/// `previous_state` tells a withdrawn request (Pending) from a cancelled
/// booking (Accepted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCancelled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub previous_state: SessionState,
    pub reason: String,
    pub cancelled_at: Timestamp,
}

domain_event!(
    SessionCancelled,
    event_type = "session.cancelled.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = cancelled_at,
    event_id = event_id
);

impl SessionCancelled {
    pub fn from_session(session: &Session, previous_state: SessionState) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            previous_state,
            reason: session.cancellation_reason().unwrap_or_default().to_string(),
            cancelled_at: *session.updated_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionCompleted
// ════════════════════════════════════════════════════════════════════════════

/// What drove a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    Manual,
    Sweep,
}

/// Published when a session is completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCompleted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub student_id: PersonId,
    pub tutor_id: TutorId,
    pub source: CompletionSource,
    pub completed_at: Timestamp,
}

domain_event!(
    SessionCompleted,
    event_type = "session.completed.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = completed_at,
    event_id = event_id
);

impl SessionCompleted {
    pub fn from_session(session: &Session, source: CompletionSource) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            student_id: *session.student_id(),
            tutor_id: *session.tutor_id(),
            source,
            completed_at: *session.updated_at(),
        }
    }
}
