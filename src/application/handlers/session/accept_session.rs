//! AcceptSessionHandler - the tutor accepts a pending request.

use std::sync::Arc;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{Session, SessionAccepted, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

use super::{load_session, persist_transition};

#[derive(Debug, Clone)]
pub struct AcceptSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct AcceptSessionResult {
    pub session: Session,
    pub event: SessionAccepted,
}

pub struct AcceptSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AcceptSessionHandler {
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
        cmd: AcceptSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<AcceptSessionResult, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.accept(Timestamp::now())?;
        persist_transition(self.repository.as_ref(), &session).await?;

        tracing::info!(session_id = %session.id(), "session accepted");

        let event = SessionAccepted::from_session(&session);
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(AcceptSessionResult { session, event })
    }
}
