//! Review repository port.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::review::Review;
use async_trait::async_trait;

/// Repository port for Review persistence. Reviews are insert-only.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Save a new review.
    ///
    /// # Errors
    ///
    /// - `DuplicateReview` if the session already has a review
    /// - `DatabaseError` on persistence failure
    async fn save(&self, review: &Review) -> Result<(), DomainError>;

    /// The review of a session, if any.
    async fn find_by_session(&self, session_id: &SessionId) -> Result<Option<Review>, DomainError>;

    /// Reviews of any of the given sessions, oldest first.
    async fn find_by_session_ids(
        &self,
        session_ids: &[SessionId],
    ) -> Result<Vec<Review>, DomainError>;
}
