//! Composition root: wires port implementations into handlers, the HTTP
//! router and the completion sweep.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;

use crate::adapters::http::{api_router, ReviewHandlers, SessionHandlers};
use crate::adapters::memory::{
    InMemoryDirectory, InMemoryReviewRepository, InMemorySessionRepository,
};
use crate::adapters::postgres::{
    PostgresDirectory, PostgresReviewRepository, PostgresSessionRepository,
};
use crate::application::handlers::{
    AcceptSessionHandler, CancelSessionHandler, CheckEligibilityHandler,
    CompleteOverdueSessionsHandler, CompleteSessionHandler, GetSessionHandler,
    ListSessionsHandler, ListTutorReviewsHandler, RejectSessionHandler, RequestSessionHandler,
    ReviewEligibilityChecker, SubmitReviewHandler, WithdrawRequestHandler,
};
use crate::ports::{
    EligibilityChecker, EventPublisher, PersonDirectory, ReviewRepository, SessionRepository,
    SubjectDirectory, TutorDirectory,
};

/// Every port the booking core depends on.
#[derive(Clone)]
pub struct BookingPorts {
    pub sessions: Arc<dyn SessionRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub subjects: Arc<dyn SubjectDirectory>,
    pub people: Arc<dyn PersonDirectory>,
    pub tutors: Arc<dyn TutorDirectory>,
    pub events: Arc<dyn EventPublisher>,
}

impl BookingPorts {
    /// Ports backed by PostgreSQL.
    pub fn postgres(pool: PgPool, events: Arc<dyn EventPublisher>) -> Self {
        let directory = Arc::new(PostgresDirectory::new(pool.clone()));
        Self {
            sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
            reviews: Arc::new(PostgresReviewRepository::new(pool)),
            subjects: directory.clone(),
            people: directory.clone(),
            tutors: directory,
            events,
        }
    }

    /// Ports backed by process memory over `directory`.
    pub fn in_memory(directory: Arc<InMemoryDirectory>, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            sessions: Arc::new(InMemorySessionRepository::new()),
            reviews: Arc::new(InMemoryReviewRepository::new()),
            subjects: directory.clone(),
            people: directory.clone(),
            tutors: directory,
            events,
        }
    }
}

/// Handlers for every booking operation, built once per process.
#[derive(Clone)]
pub struct BookingApp {
    pub sessions: SessionHandlers,
    pub reviews: ReviewHandlers,
    pub sweep: Arc<CompleteOverdueSessionsHandler>,
}

impl BookingApp {
    pub fn new(ports: &BookingPorts) -> Self {
        let eligibility: Arc<dyn EligibilityChecker> = Arc::new(ReviewEligibilityChecker::new(
            ports.sessions.clone(),
            ports.reviews.clone(),
        ));

        let sessions = SessionHandlers {
            request: Arc::new(RequestSessionHandler::new(
                ports.sessions.clone(),
                ports.subjects.clone(),
                ports.people.clone(),
                ports.tutors.clone(),
                eligibility.clone(),
                ports.events.clone(),
            )),
            accept: Arc::new(AcceptSessionHandler::new(
                ports.sessions.clone(),
                ports.events.clone(),
            )),
            reject: Arc::new(RejectSessionHandler::new(
                ports.sessions.clone(),
                ports.events.clone(),
            )),
            cancel: Arc::new(CancelSessionHandler::new(
                ports.sessions.clone(),
                ports.events.clone(),
            )),
            withdraw: Arc::new(WithdrawRequestHandler::new(
                ports.sessions.clone(),
                ports.events.clone(),
            )),
            complete: Arc::new(CompleteSessionHandler::new(
                ports.sessions.clone(),
                ports.events.clone(),
            )),
            get: Arc::new(GetSessionHandler::new(ports.sessions.clone())),
            list: Arc::new(ListSessionsHandler::new(
                ports.sessions.clone(),
                ports.subjects.clone(),
                ports.people.clone(),
                ports.tutors.clone(),
            )),
        };

        let reviews = ReviewHandlers {
            submit: Arc::new(SubmitReviewHandler::new(
                ports.sessions.clone(),
                ports.reviews.clone(),
                ports.people.clone(),
                ports.tutors.clone(),
                ports.events.clone(),
            )),
            eligibility: Arc::new(CheckEligibilityHandler::new(
                ports.people.clone(),
                eligibility,
            )),
            list: Arc::new(ListTutorReviewsHandler::new(
                ports.sessions.clone(),
                ports.reviews.clone(),
                ports.people.clone(),
                ports.tutors.clone(),
            )),
        };

        let sweep = Arc::new(CompleteOverdueSessionsHandler::new(
            ports.sessions.clone(),
            ports.events.clone(),
        ));

        Self {
            sessions,
            reviews,
            sweep,
        }
    }

    /// HTTP router over these handlers.
    pub fn router(&self, request_timeout: Duration) -> Router {
        api_router(self.sessions.clone(), self.reviews.clone(), request_timeout)
    }
}
