//! In-memory session repository.
//!
//! Same semantics as the PostgreSQL adapter, including the optimistic
//! version check. Used by tests and for running without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::session::{Session, SessionState};
use crate::ports::{SessionFilter, SessionRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn sorted(mut sessions: Vec<Session>) -> Vec<Session> {
        sessions.sort_by(|a, b| {
            a.requested_at()
                .cmp(b.requested_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        sessions
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::database(format!(
                "session {} already exists",
                session.id()
            )));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            )
        })?;

        let expected = session.version().saturating_sub(1);
        if stored.version() != expected {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "session {} was modified concurrently (stored version {}, expected {})",
                    session.id(),
                    stored.version(),
                    expected
                ),
            ));
        }

        *stored = session.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_by_filter(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(Self::sorted(
            sessions
                .values()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect(),
        ))
    }

    async fn find_accepted_scheduled_before(
        &self,
        now: &Timestamp,
    ) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut overdue: Vec<Session> = sessions
            .values()
            .filter(|s| s.state() == SessionState::Accepted && s.scheduled_at().is_before(now))
            .cloned()
            .collect();
        overdue.sort_by(|a, b| a.scheduled_at().cmp(b.scheduled_at()));
        Ok(overdue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Money, PersonId, SubjectId, TutorId};

    fn pending(student_id: PersonId, requested_at: Timestamp, scheduled_at: Timestamp) -> Session {
        Session::request(
            SessionId::new(),
            SubjectId::new(),
            student_id,
            TutorId::new(),
            scheduled_at,
            "Organic chemistry",
            Money::zero(),
            requested_at,
        )
    }

    #[tokio::test]
    async fn update_with_next_version_succeeds() {
        let repo = InMemorySessionRepository::new();
        let now = Timestamp::now();
        let mut session = pending(PersonId::new(), now, now.add_days(1));
        repo.save(&session).await.unwrap();

        session.accept(now).unwrap();
        repo.update(&session).await.unwrap();

        let stored = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.state(), SessionState::Accepted);
        assert_eq!(stored.version(), 2);
    }

    #[tokio::test]
    async fn stale_update_is_concurrent_modification() {
        let repo = InMemorySessionRepository::new();
        let now = Timestamp::now();
        let session = pending(PersonId::new(), now, now.add_days(1));
        repo.save(&session).await.unwrap();

        let mut first = session.clone();
        let mut second = session.clone();
        first.accept(now).unwrap();
        second.cancel_pending(now).unwrap();

        repo.update(&first).await.unwrap();
        let err = repo.update(&second).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ConcurrentModification);
        let stored = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.state(), SessionState::Accepted);
    }

    #[tokio::test]
    async fn update_missing_session_is_not_found() {
        let repo = InMemorySessionRepository::new();
        let now = Timestamp::now();
        let mut session = pending(PersonId::new(), now, now.add_days(1));
        session.accept(now).unwrap();

        let err = repo.update(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn filter_orders_by_requested_at() {
        let repo = InMemorySessionRepository::new();
        let student = PersonId::new();
        let now = Timestamp::now();
        let later = pending(student, now, now.add_days(3));
        let earlier = pending(student, now.minus_hours(2), now.add_days(5));
        repo.save(&later).await.unwrap();
        repo.save(&earlier).await.unwrap();
        repo.save(&pending(PersonId::new(), now, now.add_days(1)))
            .await
            .unwrap();

        let found = repo
            .find_by_filter(&SessionFilter::for_student(student))
            .await
            .unwrap();

        let ids: Vec<_> = found.iter().map(|s| *s.id()).collect();
        assert_eq!(ids, vec![*earlier.id(), *later.id()]);
    }

    #[tokio::test]
    async fn overdue_scan_returns_only_past_accepted() {
        let repo = InMemorySessionRepository::new();
        let now = Timestamp::now();
        let created = now.minus_days(2);

        let mut past_accepted = pending(PersonId::new(), created, now.minus_hours(1));
        past_accepted.accept(created).unwrap();
        let mut future_accepted = pending(PersonId::new(), created, now.add_hours(1));
        future_accepted.accept(created).unwrap();
        let past_pending = pending(PersonId::new(), created, now.minus_hours(1));

        for s in [&past_accepted, &future_accepted, &past_pending] {
            repo.save(s).await.unwrap();
        }

        let overdue = repo.find_accepted_scheduled_before(&now).await.unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id(), past_accepted.id());
    }
}
