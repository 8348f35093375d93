//! Directory ports: lookups into records owned by other services.
//!
//! Subjects and people are read-only here. Of a tutor profile only the
//! average rating is ever written.

use crate::domain::directory::{Person, Subject, TutorProfile};
use crate::domain::foundation::{DomainError, PersonId, SubjectId, TutorId};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Subject lookup.
#[async_trait]
pub trait SubjectDirectory: Send + Sync {
    /// Returns `None` if the subject does not exist.
    async fn find_subject(&self, id: &SubjectId) -> Result<Option<Subject>, DomainError>;
}

/// Person lookup (students, and the people behind tutor profiles).
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Returns `None` if the person does not exist.
    async fn find_person(&self, id: &PersonId) -> Result<Option<Person>, DomainError>;
}

/// Tutor profile lookup and reputation write-back.
#[async_trait]
pub trait TutorDirectory: Send + Sync {
    /// Returns `None` if the tutor does not exist.
    async fn find_tutor(&self, id: &TutorId) -> Result<Option<TutorProfile>, DomainError>;

    /// Overwrite the tutor's average rating, leaving every other field as stored.
    ///
    /// # Errors
    ///
    /// - `TutorNotFound` if the profile does not exist
    /// - `DatabaseError` on persistence failure
    async fn store_average_rating(
        &self,
        id: &TutorId,
        average: Decimal,
    ) -> Result<(), DomainError>;
}
