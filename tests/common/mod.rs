//! Shared harness: the full booking app over in-memory adapters with one
//! subject, one student and one tutor.

#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;

use tutor_booking::adapters::events::InMemoryEventBus;
use tutor_booking::adapters::memory::InMemoryDirectory;
use tutor_booking::app::{BookingApp, BookingPorts};
use tutor_booking::application::handlers::{
    AcceptSessionCommand, RequestSessionCommand, SubmitReviewCommand, SubmitReviewResult,
};
use tutor_booking::domain::directory::{Person, Subject, TutorProfile};
use tutor_booking::domain::foundation::{
    CommandMetadata, Money, PersonId, SessionId, SubjectId, Timestamp, TutorId,
};
use tutor_booking::domain::review::ReviewError;
use tutor_booking::domain::session::{Session, SessionError};
use tutor_booking::ports::SessionRepository;

pub struct Harness {
    pub app: BookingApp,
    pub ports: BookingPorts,
    pub bus: Arc<InMemoryEventBus>,
    pub subject_id: SubjectId,
    pub student_id: PersonId,
    pub tutor_id: TutorId,
}

impl Harness {
    pub async fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let subject = Subject {
            id: SubjectId::new(),
            code: Some(210),
            name: "Physics II".to_string(),
        };
        let student = Person {
            id: PersonId::new(),
            full_name: "Maria Salas".to_string(),
        };
        let tutor_person = Person {
            id: PersonId::new(),
            full_name: "Jorge Pena".to_string(),
        };
        let tutor = TutorProfile::new(
            TutorId::new(),
            tutor_person.id,
            Money::new(Decimal::new(40, 0)).unwrap(),
        );
        directory.add_subject(subject.clone()).await;
        directory.add_person(student.clone()).await;
        directory.add_person(tutor_person).await;
        directory.add_tutor(tutor.clone()).await;

        let bus = Arc::new(InMemoryEventBus::new());
        let ports = BookingPorts::in_memory(directory, bus.clone());
        let app = BookingApp::new(&ports);

        Self {
            app,
            ports,
            bus,
            subject_id: subject.id,
            student_id: student.id,
            tutor_id: *tutor.id(),
        }
    }

    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new("integration-test")
    }

    pub async fn request(&self, scheduled_at: Timestamp) -> Result<Session, SessionError> {
        let cmd = RequestSessionCommand {
            subject_id: self.subject_id,
            student_id: self.student_id,
            tutor_id: self.tutor_id,
            scheduled_at,
            description: "Electromagnetism".to_string(),
            offered_price: Decimal::new(3500, 2),
        };
        self.app
            .sessions
            .request
            .handle(cmd, self.metadata())
            .await
            .map(|result| result.session)
    }

    /// Requests and accepts a session at `scheduled_at`.
    pub async fn booked(&self, scheduled_at: Timestamp) -> Session {
        let session = self.request(scheduled_at).await.unwrap();
        self.app
            .sessions
            .accept
            .handle(
                AcceptSessionCommand {
                    session_id: *session.id(),
                },
                self.metadata(),
            )
            .await
            .unwrap()
            .session
    }

    pub async fn review(
        &self,
        session_id: SessionId,
        rating: i64,
    ) -> Result<SubmitReviewResult, ReviewError> {
        let cmd = SubmitReviewCommand {
            session_id,
            student_id: self.student_id,
            rating,
            comment: "Good session".to_string(),
        };
        self.app.reviews.submit.handle(cmd, self.metadata()).await
    }

    pub async fn stored(&self, id: &SessionId) -> Session {
        self.ports.sessions.find_by_id(id).await.unwrap().unwrap()
    }
}
