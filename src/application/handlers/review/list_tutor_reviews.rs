//! ListTutorReviewsHandler - every review a tutor has received.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{PersonId, ReviewId, SessionId, Timestamp, TutorId};
use crate::domain::review::ReviewError;
use crate::domain::session::SessionState;
use crate::ports::{PersonDirectory, ReviewRepository, SessionFilter, SessionRepository, TutorDirectory};

#[derive(Debug, Clone)]
pub struct ListTutorReviewsQuery {
    pub tutor_id: TutorId,
}

/// One review with the reviewing student's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorReviewView {
    pub review_id: ReviewId,
    pub session_id: SessionId,
    pub student_id: PersonId,
    pub student_name: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorReviews {
    pub tutor_id: TutorId,
    pub average_rating: Decimal,
    pub reviews: Vec<TutorReviewView>,
}

pub struct ListTutorReviewsHandler {
    sessions: Arc<dyn SessionRepository>,
    reviews: Arc<dyn ReviewRepository>,
    people: Arc<dyn PersonDirectory>,
    tutors: Arc<dyn TutorDirectory>,
}

impl ListTutorReviewsHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        reviews: Arc<dyn ReviewRepository>,
        people: Arc<dyn PersonDirectory>,
        tutors: Arc<dyn TutorDirectory>,
    ) -> Self {
        Self {
            sessions,
            reviews,
            people,
            tutors,
        }
    }

    pub async fn handle(&self, query: ListTutorReviewsQuery) -> Result<TutorReviews, ReviewError> {
        let tutor = self
            .tutors
            .find_tutor(&query.tutor_id)
            .await?
            .ok_or(ReviewError::TutorNotFound(query.tutor_id))?;

        let sessions = self
            .sessions
            .find_by_filter(
                &SessionFilter::for_tutor(query.tutor_id).with_state(SessionState::Completed),
            )
            .await?;
        let ids: Vec<SessionId> = sessions.iter().map(|s| *s.id()).collect();
        let reviews = self.reviews.find_by_session_ids(&ids).await?;

        let mut names: HashMap<PersonId, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(reviews.len());
        for review in reviews {
            let student_id = *review.student_id();
            let student_name = match names.get(&student_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .people
                        .find_person(&student_id)
                        .await?
                        .map(|p| p.full_name);
                    names.insert(student_id, name.clone());
                    name
                }
            };
            views.push(TutorReviewView {
                review_id: *review.id(),
                session_id: *review.session_id(),
                student_id,
                student_name,
                rating: review.rating().value(),
                comment: review.comment().to_string(),
                created_at: *review.created_at(),
            });
        }

        Ok(TutorReviews {
            tutor_id: query.tutor_id,
            average_rating: tutor.average_rating(),
            reviews: views,
        })
    }
}
