//! Eligibility gate port.
//!
//! A student may only request a new session once every completed session
//! of theirs has been reviewed. Session creation depends on this port.
//!
//! ```ignore
//! match checker.check(&student_id).await? {
//!     Eligibility::Eligible => { /* proceed */ }
//!     Eligibility::PendingReviews { .. } => {
//!         return Err(SessionError::policy(PolicyViolation::PendingRatingsOutstanding));
//!     }
//! }
//! ```

use crate::domain::foundation::{DomainError, PersonId, SessionId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the pending-ratings gate.
#[async_trait]
pub trait EligibilityChecker: Send + Sync {
    /// Whether `student_id` may request a new session.
    async fn check(&self, student_id: &PersonId) -> Result<Eligibility, DomainError>;
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    /// Completed sessions still waiting for the student's review.
    PendingReviews { sessions: Vec<SessionId> },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// Sessions that block the student, empty when eligible.
    pub fn pending_sessions(&self) -> &[SessionId] {
        match self {
            Eligibility::Eligible => &[],
            Eligibility::PendingReviews { sessions } => sessions,
        }
    }
}
