//! Business rules beyond the raw state graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A violated business rule.
///
/// Each rule has a stable code for clients and a human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyViolation {
    /// The student has a completed session they have not reviewed yet.
    PendingRatingsOutstanding,
    /// The session time has already passed, so it can no longer be cancelled.
    SessionTimePassed,
    /// The session time has not passed yet, so it cannot be completed.
    SessionNotYetHeld,
    /// Manual completion requires an accepted session.
    SessionNotAccepted,
    /// Reviews are only accepted for completed sessions.
    SessionNotCompleted,
    /// The session already has a review.
    SessionAlreadyReviewed,
    /// Only the session's own student may review it.
    NotSessionStudent,
}

impl PolicyViolation {
    pub fn code(&self) -> &'static str {
        match self {
            PolicyViolation::PendingRatingsOutstanding => "pending_ratings_outstanding",
            PolicyViolation::SessionTimePassed => "session_time_passed",
            PolicyViolation::SessionNotYetHeld => "session_not_yet_held",
            PolicyViolation::SessionNotAccepted => "session_not_accepted",
            PolicyViolation::SessionNotCompleted => "session_not_completed",
            PolicyViolation::SessionAlreadyReviewed => "session_already_reviewed",
            PolicyViolation::NotSessionStudent => "not_session_student",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PolicyViolation::PendingRatingsOutstanding => {
                "pending ratings outstanding: review your completed sessions first"
            }
            PolicyViolation::SessionTimePassed => {
                "cannot cancel a session whose time has passed"
            }
            PolicyViolation::SessionNotYetHeld => {
                "cannot complete a session whose time has not passed"
            }
            PolicyViolation::SessionNotAccepted => "only accepted sessions can be completed",
            PolicyViolation::SessionNotCompleted => "session not completed",
            PolicyViolation::SessionAlreadyReviewed => "session already reviewed",
            PolicyViolation::NotSessionStudent => "only the session's student may review it",
        }
    }
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
