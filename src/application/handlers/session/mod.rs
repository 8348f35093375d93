//! Session command and query handlers.

mod accept_session;
mod cancel_session;
mod complete_overdue_sessions;
mod complete_session;
mod get_session;
mod list_sessions;
mod reject_session;
mod request_session;
mod withdraw_request;

pub use accept_session::{AcceptSessionCommand, AcceptSessionHandler, AcceptSessionResult};
pub use cancel_session::{CancelSessionCommand, CancelSessionHandler, CancelSessionResult};
pub use complete_overdue_sessions::{CompleteOverdueSessionsHandler, SweepReport};
pub use complete_session::{CompleteSessionCommand, CompleteSessionHandler, CompleteSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery, SessionSummary};
pub use reject_session::{RejectSessionCommand, RejectSessionHandler, RejectSessionResult};
pub use request_session::{RequestSessionCommand, RequestSessionHandler, RequestSessionResult};
pub use withdraw_request::{WithdrawRequestCommand, WithdrawRequestHandler, WithdrawRequestResult};

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Loads a session or fails with `NotFound`.
pub(crate) async fn load_session(
    repository: &dyn SessionRepository,
    id: &SessionId,
) -> Result<Session, SessionError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or(SessionError::NotFound(*id))
}

/// Persists a transition through the optimistic update.
pub(crate) async fn persist_transition(
    repository: &dyn SessionRepository,
    session: &Session,
) -> Result<(), SessionError> {
    repository.update(session).await.map_err(|e| match e.code {
        ErrorCode::SessionNotFound => SessionError::NotFound(*session.id()),
        _ => SessionError::from(e),
    })
}
