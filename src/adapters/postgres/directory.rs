//! PostgreSQL implementation of the directory ports.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::directory::{Person, Subject, TutorProfile};
use crate::domain::foundation::{DomainError, ErrorCode, Money, PersonId, SubjectId, TutorId};
use crate::ports::{PersonDirectory, SubjectDirectory, TutorDirectory};

use super::row::{column, query_failed};

/// Reads subjects, people and tutor profiles; writes tutor ratings.
#[derive(Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectDirectory for PostgresDirectory {
    async fn find_subject(&self, id: &SubjectId) -> Result<Option<Subject>, DomainError> {
        let row = sqlx::query("SELECT id, code, name FROM subjects WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("fetch subject"))?;

        row.map(|row| {
            Ok(Subject {
                id: SubjectId::from_uuid(column::<Uuid>(&row, "id")?),
                code: column(&row, "code")?,
                name: column(&row, "name")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl PersonDirectory for PostgresDirectory {
    async fn find_person(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        let row = sqlx::query("SELECT id, full_name FROM people WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("fetch person"))?;

        row.map(|row| {
            Ok(Person {
                id: PersonId::from_uuid(column::<Uuid>(&row, "id")?),
                full_name: column(&row, "full_name")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl TutorDirectory for PostgresDirectory {
    async fn find_tutor(&self, id: &TutorId) -> Result<Option<TutorProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, person_id, hourly_rate, average_rating, active
            FROM tutors
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("fetch tutor"))?;

        row.map(|row| {
            let rate: Decimal = column(&row, "hourly_rate")?;
            let hourly_rate = Money::new(rate)
                .map_err(|e| DomainError::database(format!("Invalid hourly rate: {}", e)))?;
            Ok(TutorProfile::reconstitute(
                TutorId::from_uuid(column::<Uuid>(&row, "id")?),
                PersonId::from_uuid(column::<Uuid>(&row, "person_id")?),
                hourly_rate,
                column(&row, "average_rating")?,
                column(&row, "active")?,
            ))
        })
        .transpose()
    }

    async fn store_average_rating(
        &self,
        id: &TutorId,
        average: Decimal,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE tutors SET average_rating = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(average)
            .execute(&self.pool)
            .await
            .map_err(query_failed("store tutor rating"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TutorNotFound,
                format!("Tutor not found: {}", id),
            ));
        }

        Ok(())
    }
}
