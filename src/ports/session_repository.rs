//! Session repository port.
//!
//! Narrow queries per use case: by id, by participant (with optional state
//! and time filters), and the overdue scan used by the completion sweep.

use crate::domain::foundation::{DomainError, PersonId, SessionId, Timestamp, TutorId};
use crate::domain::session::{Session, SessionState};
use async_trait::async_trait;

/// Which side of the booking a listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    Student(PersonId),
    Tutor(TutorId),
}

impl Participant {
    /// Returns true if `session` involves this participant.
    pub fn matches(&self, session: &Session) -> bool {
        match self {
            Participant::Student(id) => session.student_id() == id,
            Participant::Tutor(id) => session.tutor_id() == id,
        }
    }
}

/// Filter for participant listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFilter {
    pub participant: Participant,
    pub state: Option<SessionState>,
    /// Only sessions scheduled strictly after this instant.
    pub scheduled_after: Option<Timestamp>,
}

impl SessionFilter {
    pub fn for_student(student_id: PersonId) -> Self {
        Self {
            participant: Participant::Student(student_id),
            state: None,
            scheduled_after: None,
        }
    }

    pub fn for_tutor(tutor_id: TutorId) -> Self {
        Self {
            participant: Participant::Tutor(tutor_id),
            state: None,
            scheduled_after: None,
        }
    }

    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn scheduled_after(mut self, instant: Timestamp) -> Self {
        self.scheduled_after = Some(instant);
        self
    }

    /// Returns true if `session` passes every criterion.
    pub fn matches(&self, session: &Session) -> bool {
        self.participant.matches(session)
            && self.state.map_or(true, |state| session.state() == state)
            && self
                .scheduled_after
                .map_or(true, |after| session.scheduled_at().is_after(&after))
    }
}

/// Repository port for Session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Persist a transition.
    ///
    /// The stored row must be at `session.version() - 1`; it is then moved
    /// to `session.version()`.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `ConcurrentModification` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Sessions matching `filter`, ordered by `requested_at` ascending.
    async fn find_by_filter(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError>;

    /// Accepted sessions scheduled strictly before `now`, oldest first.
    async fn find_accepted_scheduled_before(
        &self,
        now: &Timestamp,
    ) -> Result<Vec<Session>, DomainError>;
}
