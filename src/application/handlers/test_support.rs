//! Shared fixture for handler tests: in-memory adapters seeded with one
//! subject, one student and one tutor.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{
    InMemoryDirectory, InMemoryReviewRepository, InMemorySessionRepository,
};
use crate::application::handlers::review::ReviewEligibilityChecker;
use crate::domain::directory::{Person, Subject, TutorProfile};
use crate::domain::foundation::{
    CommandMetadata, Money, PersonId, Rating, ReviewId, SessionId, SubjectId, Timestamp, TutorId,
};
use crate::domain::review::Review;
use crate::domain::session::{Session, SessionState};
use crate::ports::{ReviewRepository, SessionRepository};

pub(crate) struct Fixture {
    pub sessions: Arc<InMemorySessionRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
    pub directory: Arc<InMemoryDirectory>,
    pub bus: Arc<InMemoryEventBus>,
    pub subject: Subject,
    pub student: Person,
    pub tutor_person: Person,
    pub tutor: TutorProfile,
}

impl Fixture {
    pub async fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());

        let subject = Subject {
            id: SubjectId::new(),
            code: Some(101),
            name: "Calculus I".to_string(),
        };
        let student = Person {
            id: PersonId::new(),
            full_name: "Ana Gomez".to_string(),
        };
        let tutor_person = Person {
            id: PersonId::new(),
            full_name: "Luis Rojas".to_string(),
        };
        let tutor = TutorProfile::new(
            TutorId::new(),
            tutor_person.id,
            Money::new(Decimal::new(3000, 2)).unwrap(),
        );

        directory.add_subject(subject.clone()).await;
        directory.add_person(student.clone()).await;
        directory.add_person(tutor_person.clone()).await;
        directory.add_tutor(tutor.clone()).await;

        Self {
            sessions: Arc::new(InMemorySessionRepository::new()),
            reviews: Arc::new(InMemoryReviewRepository::new()),
            directory,
            bus: Arc::new(InMemoryEventBus::new()),
            subject,
            student,
            tutor_person,
            tutor,
        }
    }

    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new("test").with_correlation_id("test-correlation")
    }

    pub fn eligibility(&self) -> Arc<ReviewEligibilityChecker> {
        Arc::new(ReviewEligibilityChecker::new(
            self.sessions.clone(),
            self.reviews.clone(),
        ))
    }

    pub async fn add_student(&self, full_name: &str) -> Person {
        let person = Person {
            id: PersonId::new(),
            full_name: full_name.to_string(),
        };
        self.directory.add_person(person.clone()).await;
        person
    }

    /// Stores a session for the fixture's student and tutor in `state`.
    pub async fn seed_session(&self, state: SessionState, scheduled_at: Timestamp) -> Session {
        self.seed_session_for(self.student.id, state, scheduled_at).await
    }

    pub async fn seed_session_for(
        &self,
        student_id: PersonId,
        state: SessionState,
        scheduled_at: Timestamp,
    ) -> Session {
        let requested_at = scheduled_at.minus_days(3);
        let mut session = Session::request(
            SessionId::new(),
            self.subject.id,
            student_id,
            *self.tutor.id(),
            scheduled_at,
            "Limits and continuity",
            Money::new(Decimal::new(2500, 2)).unwrap(),
            requested_at,
        );
        match state {
            SessionState::Pending => {}
            SessionState::Accepted => session.accept(requested_at).unwrap(),
            SessionState::Rejected => session.reject("busy that week", requested_at).unwrap(),
            SessionState::Cancelled => session.cancel_pending(requested_at).unwrap(),
            SessionState::Completed => {
                session.accept(requested_at).unwrap();
                session.complete_by_sweep(scheduled_at.add_hours(1)).unwrap();
            }
        }
        self.sessions.save(&session).await.unwrap();
        session
    }

    pub async fn seed_review(&self, session: &Session, rating: i64) -> Review {
        let review = Review::new(
            ReviewId::new(),
            *session.id(),
            *session.student_id(),
            Rating::new(rating).unwrap(),
            "seeded",
            Timestamp::now(),
        );
        self.reviews.save(&review).await.unwrap();
        review
    }
}
