//! WithdrawRequestHandler - the student withdraws a pending request.

use std::sync::Arc;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::session::{Session, SessionCancelled, SessionError, SessionState};
use crate::ports::{EventPublisher, SessionRepository};

use super::{load_session, persist_transition};

#[derive(Debug, Clone)]
pub struct WithdrawRequestCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct WithdrawRequestResult {
    pub session: Session,
    pub event: SessionCancelled,
}

pub struct WithdrawRequestHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl WithdrawRequestHandler {
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
        cmd: WithdrawRequestCommand,
        metadata: CommandMetadata,
    ) -> Result<WithdrawRequestResult, SessionError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.cancel_pending(Timestamp::now())?;
        persist_transition(self.repository.as_ref(), &session).await?;

        tracing::info!(session_id = %session.id(), "session request withdrawn");

        let event = SessionCancelled::from_session(&session, SessionState::Pending);
        publish_event(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(WithdrawRequestResult { session, event })
    }
}
