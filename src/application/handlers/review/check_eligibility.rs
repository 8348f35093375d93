//! Pending-ratings gate: the `EligibilityChecker` implementation and the
//! query handler that exposes it.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId, SessionId};
use crate::domain::review::ReviewError;
use crate::domain::session::SessionState;
use crate::ports::{
    Eligibility, EligibilityChecker, PersonDirectory, ReviewRepository, SessionFilter,
    SessionRepository,
};

/// A student is eligible when each of their completed sessions has a review.
pub struct ReviewEligibilityChecker {
    sessions: Arc<dyn SessionRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewEligibilityChecker {
    pub fn new(sessions: Arc<dyn SessionRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { sessions, reviews }
    }
}

#[async_trait]
impl EligibilityChecker for ReviewEligibilityChecker {
    async fn check(&self, student_id: &PersonId) -> Result<Eligibility, DomainError> {
        let completed = self
            .sessions
            .find_by_filter(
                &SessionFilter::for_student(*student_id).with_state(SessionState::Completed),
            )
            .await?;
        if completed.is_empty() {
            return Ok(Eligibility::Eligible);
        }

        let ids: Vec<SessionId> = completed.iter().map(|s| *s.id()).collect();
        let reviewed: HashSet<SessionId> = self
            .reviews
            .find_by_session_ids(&ids)
            .await?
            .iter()
            .map(|r| *r.session_id())
            .collect();

        let pending: Vec<SessionId> = ids
            .into_iter()
            .filter(|id| !reviewed.contains(id))
            .collect();

        if pending.is_empty() {
            Ok(Eligibility::Eligible)
        } else {
            Ok(Eligibility::PendingReviews { sessions: pending })
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckEligibilityQuery {
    pub student_id: PersonId,
}

/// Query handler behind the eligibility endpoint.
pub struct CheckEligibilityHandler {
    people: Arc<dyn PersonDirectory>,
    checker: Arc<dyn EligibilityChecker>,
}

impl CheckEligibilityHandler {
    pub fn new(people: Arc<dyn PersonDirectory>, checker: Arc<dyn EligibilityChecker>) -> Self {
        Self { people, checker }
    }

    pub async fn handle(&self, query: CheckEligibilityQuery) -> Result<Eligibility, ReviewError> {
        if self.people.find_person(&query.student_id).await?.is_none() {
            return Err(ReviewError::PersonNotFound(query.student_id));
        }
        Ok(self.checker.check(&query.student_id).await?)
    }
}
