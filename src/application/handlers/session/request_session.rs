//! RequestSessionHandler - a student proposes a session to a tutor.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{
    CommandMetadata, Money, PersonId, PolicyViolation, SessionId, SubjectId, Timestamp, TutorId,
};
use crate::domain::session::{Session, SessionError, SessionRequested};
use crate::ports::{
    Eligibility, EligibilityChecker, EventPublisher, PersonDirectory, SessionRepository,
    SubjectDirectory, TutorDirectory,
};

/// Command to request a new session.
#[derive(Debug, Clone)]
pub struct RequestSessionCommand {
    pub subject_id: SubjectId,
    pub student_id: PersonId,
    pub tutor_id: TutorId,
    pub scheduled_at: Timestamp,
    pub description: String,
    pub offered_price: Decimal,
}

/// Result of a successful request.
#[derive(Debug, Clone)]
pub struct RequestSessionResult {
    pub session: Session,
    pub event: SessionRequested,
}

/// Handler for session requests.
pub struct RequestSessionHandler {
    repository: Arc<dyn SessionRepository>,
    subjects: Arc<dyn SubjectDirectory>,
    people: Arc<dyn PersonDirectory>,
    tutors: Arc<dyn TutorDirectory>,
    eligibility: Arc<dyn EligibilityChecker>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RequestSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        subjects: Arc<dyn SubjectDirectory>,
        people: Arc<dyn PersonDirectory>,
        tutors: Arc<dyn TutorDirectory>,
        eligibility: Arc<dyn EligibilityChecker>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            subjects,
            people,
            tutors,
            eligibility,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RequestSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<RequestSessionResult, SessionError> {
        let offered_price = Money::new(cmd.offered_price)?;

        // 1. Resolve references
        if self.subjects.find_subject(&cmd.subject_id).await?.is_none() {
            return Err(SessionError::SubjectNotFound(cmd.subject_id));
        }
        if self.people.find_person(&cmd.student_id).await?.is_none() {
            return Err(SessionError::PersonNotFound(cmd.student_id));
        }
        if self.tutors.find_tutor(&cmd.tutor_id).await?.is_none() {
            return Err(SessionError::TutorNotFound(cmd.tutor_id));
        }

        // 2. Pending-ratings gate
        if let Eligibility::PendingReviews { sessions } =
            self.eligibility.check(&cmd.student_id).await?
        {
            tracing::info!(
                student_id = %cmd.student_id,
                unreviewed = sessions.len(),
                "session request blocked by pending reviews"
            );
            return Err(SessionError::policy(
                PolicyViolation::PendingRatingsOutstanding,
            ));
        }

        // 3. Create and persist
        let session = Session::request(
            SessionId::new(),
            cmd.subject_id,
            cmd.student_id,
            cmd.tutor_id,
            cmd.scheduled_at,
            cmd.description,
            offered_price,
            Timestamp::now(),
        );
        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            student_id = %session.student_id(),
            tutor_id = %session.tutor_id(),
            "session requested"
        );

        // 4. Announce
        let event = SessionRequested::from_session(&session);
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(RequestSessionResult { session, event })
    }
}
