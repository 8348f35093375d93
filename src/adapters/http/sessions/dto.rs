//! HTTP DTOs for session endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::SessionSummary;
use crate::domain::foundation::{PersonId, SubjectId, Timestamp, TutorId};
use crate::domain::session::{Session, SessionState};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSessionRequest {
    pub subject_id: SubjectId,
    pub student_id: PersonId,
    pub tutor_id: TutorId,
    pub scheduled_at: Timestamp,
    #[serde(default)]
    pub description: String,
    pub offered_price: Decimal,
}

/// Body of the reject and cancel endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReasonRequest {
    #[serde(default)]
    pub reason: String,
}

/// `?state=` filter for session listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSessionsParams {
    #[serde(default)]
    pub state: Option<SessionState>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full session view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub subject_id: String,
    pub student_id: String,
    pub tutor_id: String,
    pub requested_at: String,
    pub scheduled_at: String,
    pub description: String,
    pub offered_price: Decimal,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub version: u32,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            subject_id: session.subject_id().to_string(),
            student_id: session.student_id().to_string(),
            tutor_id: session.tutor_id().to_string(),
            requested_at: session.requested_at().as_datetime().to_rfc3339(),
            scheduled_at: session.scheduled_at().as_datetime().to_rfc3339(),
            description: session.description().to_string(),
            offered_price: session.offered_price().amount(),
            state: session.state(),
            rejection_reason: session.rejection_reason().map(str::to_string),
            cancellation_reason: session.cancellation_reason().map(str::to_string),
            version: session.version(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Session listing for a student or tutor.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionSummary>,
    pub total: usize,
}

impl From<Vec<SessionSummary>> for SessionListResponse {
    fn from(items: Vec<SessionSummary>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
