//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, PersonId, Rating, ReviewId, SessionId, Timestamp,
};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

use super::row::{column, query_failed};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of ReviewRepository.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn save(&self, review: &Review) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, session_id, student_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id().as_uuid())
        .bind(review.session_id().as_uuid())
        .bind(review.student_id().as_uuid())
        .bind(i16::from(review.rating().value()))
        .bind(review.comment())
        .bind(review.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                DomainError::new(
                    ErrorCode::DuplicateReview,
                    format!("session {} already has a review", review.session_id()),
                )
            }
            _ => DomainError::database(format!("Failed to insert review: {}", e)),
        })?;

        Ok(())
    }

    async fn find_by_session(&self, session_id: &SessionId) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, student_id, rating, comment, created_at
            FROM reviews
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("fetch review"))?;

        row.as_ref().map(row_to_review).transpose()
    }

    async fn find_by_session_ids(
        &self,
        session_ids: &[SessionId],
    ) -> Result<Vec<Review>, DomainError> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = session_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, session_id, student_id, rating, comment, created_at
            FROM reviews
            WHERE session_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("fetch reviews by session"))?;

        rows.iter().map(row_to_review).collect()
    }
}

fn row_to_review(row: &PgRow) -> Result<Review, DomainError> {
    let rating: i16 = column(row, "rating")?;
    let rating = Rating::new(i64::from(rating))
        .map_err(|e| DomainError::database(format!("Invalid stored rating: {}", e)))?;

    Ok(Review::reconstitute(
        ReviewId::from_uuid(column::<Uuid>(row, "id")?),
        SessionId::from_uuid(column::<Uuid>(row, "session_id")?),
        PersonId::from_uuid(column::<Uuid>(row, "student_id")?),
        rating,
        column(row, "comment")?,
        Timestamp::from_datetime(column::<DateTime<Utc>>(row, "created_at")?),
    ))
}
