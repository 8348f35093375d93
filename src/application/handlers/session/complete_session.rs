//! CompleteSessionHandler - marks an accepted session as held.

use std::sync::Arc;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{CompletionSource, Session, SessionCompleted, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

use super::{load_session, persist_transition};

#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct CompleteSessionResult {
    pub session: Session,
    pub event: SessionCompleted,
}

pub struct CompleteSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CompleteSessionHandler {
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
        cmd: CompleteSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CompleteSessionResult, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.complete_manually(Timestamp::now())?;
        persist_transition(self.repository.as_ref(), &session).await?;

        tracing::info!(session_id = %session.id(), source = "manual", "session completed");

        let event = SessionCompleted::from_session(&session, CompletionSource::Manual);
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(CompleteSessionResult { session, event })
    }
}
