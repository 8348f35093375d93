//! PostgreSQL implementation of SessionRepository.
//!
//! Updates are conditional on the stored version so concurrent writers
//! cannot both apply a transition to the same session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, PersonId, SessionId, SubjectId, Timestamp, TutorId,
};
use crate::domain::session::{Session, SessionState};
use crate::ports::{Participant, SessionFilter, SessionRepository};

use super::row::{column, query_failed};

const SESSION_COLUMNS: &str = "id, subject_id, student_id, tutor_id, requested_at, scheduled_at, \
     description, offered_price, state, rejection_reason, cancellation_reason, version, updated_at";

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sessions WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("check session existence"))?;
        Ok(result.0)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, subject_id, student_id, tutor_id, requested_at, scheduled_at,
                description, offered_price, state, rejection_reason, cancellation_reason,
                version, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.subject_id().as_uuid())
        .bind(session.student_id().as_uuid())
        .bind(session.tutor_id().as_uuid())
        .bind(session.requested_at().as_datetime())
        .bind(session.scheduled_at().as_datetime())
        .bind(session.description())
        .bind(session.offered_price().amount())
        .bind(session.state().as_str())
        .bind(session.rejection_reason())
        .bind(session.cancellation_reason())
        .bind(i64::from(session.version()))
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(query_failed("insert session"))?;

        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let expected = i64::from(session.version().saturating_sub(1));
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                state = $3,
                rejection_reason = $4,
                cancellation_reason = $5,
                version = $6,
                updated_at = $7
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(expected)
        .bind(session.state().as_str())
        .bind(session.rejection_reason())
        .bind(session.cancellation_reason())
        .bind(i64::from(session.version()))
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(query_failed("update session"))?;

        if result.rows_affected() == 0 {
            return Err(if self.exists(session.id()).await? {
                DomainError::new(
                    ErrorCode::ConcurrentModification,
                    format!(
                        "session {} was modified concurrently (expected version {})",
                        session.id(),
                        expected
                    ),
                )
            } else {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session not found: {}", session.id()),
                )
            });
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM sessions WHERE id = $1", SESSION_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("fetch session"))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn find_by_filter(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM sessions WHERE ", SESSION_COLUMNS));
        push_filter(&mut query, filter);
        query.push(" ORDER BY requested_at ASC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("fetch sessions by filter"))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn find_accepted_scheduled_before(
        &self,
        now: &Timestamp,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE state = 'accepted' AND scheduled_at < $1 \
             ORDER BY scheduled_at ASC",
            SESSION_COLUMNS
        ))
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("fetch overdue sessions"))?;

        rows.iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &SessionFilter) {
    match filter.participant {
        Participant::Student(id) => {
            query.push("student_id = ").push_bind(*id.as_uuid());
        }
        Participant::Tutor(id) => {
            query.push("tutor_id = ").push_bind(*id.as_uuid());
        }
    }
    if let Some(state) = filter.state {
        query.push(" AND state = ").push_bind(state.as_str());
    }
    if let Some(after) = filter.scheduled_after {
        query.push(" AND scheduled_at > ").push_bind(*after.as_datetime());
    }
}

fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let state: String = column(row, "state")?;
    let state = state
        .parse::<SessionState>()
        .map_err(|e| DomainError::database(format!("Invalid session state: {}", e)))?;

    let price: Decimal = column(row, "offered_price")?;
    let offered_price =
        Money::new(price).map_err(|e| DomainError::database(format!("Invalid price: {}", e)))?;

    let version: i64 = column(row, "version")?;
    let version = u32::try_from(version)
        .map_err(|_| DomainError::database(format!("Invalid session version: {}", version)))?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(column::<Uuid>(row, "id")?),
        SubjectId::from_uuid(column::<Uuid>(row, "subject_id")?),
        PersonId::from_uuid(column::<Uuid>(row, "student_id")?),
        TutorId::from_uuid(column::<Uuid>(row, "tutor_id")?),
        Timestamp::from_datetime(column::<DateTime<Utc>>(row, "requested_at")?),
        Timestamp::from_datetime(column::<DateTime<Utc>>(row, "scheduled_at")?),
        column(row, "description")?,
        offered_price,
        state,
        column(row, "rejection_reason")?,
        column(row, "cancellation_reason")?,
        version,
        Timestamp::from_datetime(column::<DateTime<Utc>>(row, "updated_at")?),
    ))
}
