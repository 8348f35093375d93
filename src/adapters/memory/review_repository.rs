//! In-memory review repository with the one-review-per-session rule.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewRepository {
    by_session: Arc<RwLock<HashMap<SessionId, Review>>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.by_session.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.by_session.read().await.is_empty()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn save(&self, review: &Review) -> Result<(), DomainError> {
        let mut reviews = self.by_session.write().await;
        if reviews.contains_key(review.session_id()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateReview,
                format!("session {} already has a review", review.session_id()),
            ));
        }
        reviews.insert(*review.session_id(), review.clone());
        Ok(())
    }

    async fn find_by_session(&self, session_id: &SessionId) -> Result<Option<Review>, DomainError> {
        Ok(self.by_session.read().await.get(session_id).cloned())
    }

    async fn find_by_session_ids(
        &self,
        session_ids: &[SessionId],
    ) -> Result<Vec<Review>, DomainError> {
        let reviews = self.by_session.read().await;
        let mut found: Vec<Review> = session_ids
            .iter()
            .filter_map(|id| reviews.get(id).cloned())
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(found)
    }
}
