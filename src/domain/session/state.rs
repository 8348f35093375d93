//! SessionState enum tracking the lifecycle of a tutoring session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle state of a tutoring session.
///
/// ```text
/// Pending ──► Accepted ──► Completed
///    │            │
///    │            └──────► Cancelled
///    ├──► Rejected
///    └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

impl SessionState {
    /// All states, in lifecycle order.
    pub const ALL: [SessionState; 5] = [
        SessionState::Pending,
        SessionState::Accepted,
        SessionState::Rejected,
        SessionState::Cancelled,
        SessionState::Completed,
    ];

    /// Stable lowercase name used in storage and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Pending => "pending",
            SessionState::Accepted => "accepted",
            SessionState::Rejected => "rejected",
            SessionState::Cancelled => "cancelled",
            SessionState::Completed => "completed",
        }
    }
}

impl StateMachine for SessionState {
    fn valid_transitions(&self) -> &'static [Self] {
        use SessionState::*;
        match self {
            Pending => &[Accepted, Rejected, Cancelled],
            Accepted => &[Completed, Cancelled],
            Rejected | Cancelled | Completed => &[],
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Pending => "Pending",
            SessionState::Accepted => "Accepted",
            SessionState::Rejected => "Rejected",
            SessionState::Cancelled => "Cancelled",
            SessionState::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SessionState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("state", format!("unknown session state '{}'", s))
            })
    }
}
