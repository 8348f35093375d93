//! RejectSessionHandler - the tutor turns down a pending request.

use std::sync::Arc;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{Session, SessionError, SessionRejected};
use crate::ports::{EventPublisher, SessionRepository};

use super::{load_session, persist_transition};

#[derive(Debug, Clone)]
pub struct RejectSessionCommand {
    pub session_id: SessionId,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RejectSessionResult {
    pub session: Session,
    pub event: SessionRejected,
}

pub struct RejectSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RejectSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RejectSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<RejectSessionResult, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.reject(&cmd.reason, Timestamp::now())?;
        persist_transition(self.repository.as_ref(), &session).await?;

        tracing::info!(session_id = %session.id(), "session rejected");

        let event = SessionRejected::from_session(&session);
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(RejectSessionResult { session, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::session::SessionState;

    fn handler(fx: &Fixture) -> RejectSessionHandler {
        RejectSessionHandler::new(fx.sessions.clone(), fx.bus.clone())
    }

    #[tokio::test]
    async fn rejects_with_reason() {
        let fx = Fixture::new().await;
        let session = fx
            .seed_session(SessionState::Pending, Timestamp::now().add_days(1))
            .await;

        let result = handler(&fx)
            .handle(
                RejectSessionCommand {
                    session_id: *session.id(),
                    reason: "Fully booked".to_string(),
                },
                fx.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.session.state(), SessionState::Rejected);
        assert_eq!(result.session.rejection_reason(), Some("Fully booked"));
        assert_eq!(result.event.reason, "Fully booked");
    }

    #[tokio::test]
    async fn blank_reason_is_validation_failure() {
        let fx = Fixture::new().await;
        let session = fx
            .seed_session(SessionState::Pending, Timestamp::now().add_days(1))
            .await;

        let result = handler(&fx)
            .handle(
                RejectSessionCommand {
                    session_id: *session.id(),
                    reason: " ".to_string(),
                },
                fx.metadata(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
        assert_eq!(fx.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn rejecting_accepted_session_is_invalid_state() {
        let fx = Fixture::new().await;
        let session = fx
            .seed_session(SessionState::Accepted, Timestamp::now().add_days(1))
            .await;

        let result = handler(&fx)
            .handle(
                RejectSessionCommand {
                    session_id: *session.id(),
                    reason: "changed plans".to_string(),
                },
                fx.metadata(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }
}
