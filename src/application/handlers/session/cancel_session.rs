//! CancelSessionHandler - cancels an accepted session ahead of its time.

use std::sync::Arc;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{Session, SessionCancelled, SessionError, SessionState};
use crate::ports::{EventPublisher, SessionRepository};

use super::{load_session, persist_transition};

#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
    pub event: SessionCancelled,
}

pub struct CancelSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelSessionHandler {
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
        cmd: CancelSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelSessionResult, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.cancel_accepted(&cmd.reason, Timestamp::now())?;
        persist_transition(self.repository.as_ref(), &session).await?;

        tracing::info!(session_id = %session.id(), "accepted session cancelled");

        let event = SessionCancelled::from_session(&session, SessionState::Accepted);
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(CancelSessionResult { session, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::PolicyViolation;

    fn handler(fx: &Fixture) -> CancelSessionHandler {
        CancelSessionHandler::new(fx.sessions.clone(), fx.bus.clone())
    }

    fn command(session: &Session) -> CancelSessionCommand {
        CancelSessionCommand {
            session_id: *session.id(),
            reason: "Family emergency".to_string(),
        }
    }

    #[tokio::test]
    async fn cancels_future_accepted_session() {
        let fx = Fixture::new().await;
        let session = fx
            .seed_session(SessionState::Accepted, Timestamp::now().add_days(1))
            .await;

        let result = handler(&fx)
            .handle(command(&session), fx.metadata())
            .await
            .unwrap();

        assert_eq!(result.session.state(), SessionState::Cancelled);
        assert_eq!(result.session.cancellation_reason(), Some("Family emergency"));
        assert_eq!(result.event.previous_state, SessionState::Accepted);
    }

    #[tokio::test]
    async fn past_accepted_session_cannot_be_cancelled() {
        let fx = Fixture::new().await;
        let session = fx
            .seed_session(SessionState::Accepted, Timestamp::now().minus_hours(2))
            .await;

        let result = handler(&fx).handle(command(&session), fx.metadata()).await;

        assert_eq!(
            result.unwrap_err(),
            SessionError::policy(PolicyViolation::SessionTimePassed)
        );
        assert!(!fx.bus.has_event("session.cancelled.v1"));
    }

    #[tokio::test]
    async fn pending_session_is_invalid_state() {
        let fx = Fixture::new().await;
        let session = fx
            .seed_session(SessionState::Pending, Timestamp::now().add_days(1))
            .await;

        let result = handler(&fx).handle(command(&session), fx.metadata()).await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }
}
