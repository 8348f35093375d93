//! GetSessionHandler - Query handler for a single session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

use super::load_session;

#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SessionError> {
        load_session(self.repository.as_ref(), &query.session_id).await
    }
}
