//! Row decoding helpers shared by the PostgreSQL adapters.

use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use crate::domain::foundation::DomainError;

/// Reads column `name`, mapping decode failures to a database error.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

/// Wraps a query failure with what was being attempted.
pub(super) fn query_failed(action: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}
