//! SubmitReviewHandler - a student rates a completed session, and the
//! tutor's average is recomputed from every review they have.
//!
//! Recomputations for one tutor are serialized, so the last stored average
//! always counts every review saved before it was read.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::application::handlers::events::publish_event;
use crate::domain::foundation::{
    CommandMetadata, EventId, PersonId, PolicyViolation, Rating, ReviewId, SessionId, Timestamp,
    TutorId,
};
use crate::domain::review::{
    average_rating, Review, ReviewError, ReviewSubmitted, TutorRatingRecalculated,
};
use crate::domain::session::SessionState;
use crate::ports::{
    EventPublisher, PersonDirectory, ReviewRepository, SessionFilter, SessionRepository,
    TutorDirectory,
};

#[derive(Debug, Clone)]
pub struct SubmitReviewCommand {
    pub session_id: SessionId,
    pub student_id: PersonId,
    pub rating: i64,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct SubmitReviewResult {
    pub review: Review,
    /// The tutor's average after this review.
    pub tutor_average: Decimal,
    pub tutor_review_count: usize,
}

pub struct SubmitReviewHandler {
    sessions: Arc<dyn SessionRepository>,
    reviews: Arc<dyn ReviewRepository>,
    people: Arc<dyn PersonDirectory>,
    tutors: Arc<dyn TutorDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
    tutor_locks: Mutex<HashMap<TutorId, Arc<Mutex<()>>>>,
}

impl SubmitReviewHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        reviews: Arc<dyn ReviewRepository>,
        people: Arc<dyn PersonDirectory>,
        tutors: Arc<dyn TutorDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            reviews,
            people,
            tutors,
            event_publisher,
            tutor_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitReviewResult, ReviewError> {
        let rating = Rating::new(cmd.rating)?;

        // 1. Eligibility of this review
        if self.people.find_person(&cmd.student_id).await?.is_none() {
            return Err(ReviewError::PersonNotFound(cmd.student_id));
        }
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(ReviewError::SessionNotFound(cmd.session_id))?;
        if !session.is_student(&cmd.student_id) {
            return Err(ReviewError::policy(PolicyViolation::NotSessionStudent));
        }
        if session.state() != SessionState::Completed {
            return Err(ReviewError::policy(PolicyViolation::SessionNotCompleted));
        }
        if self.reviews.find_by_session(&cmd.session_id).await?.is_some() {
            // A prior attempt may have stored the review but not the average.
            if let Err(err) = self.refresh_reputation(session.tutor_id()).await {
                tracing::warn!(
                    tutor_id = %session.tutor_id(),
                    error = %err,
                    "could not refresh tutor rating"
                );
            }
            return Err(ReviewError::policy(PolicyViolation::SessionAlreadyReviewed));
        }
        let tutor = self
            .tutors
            .find_tutor(session.tutor_id())
            .await?
            .ok_or(ReviewError::TutorNotFound(*session.tutor_id()))?;

        // 2. Record the review
        let review = Review::new(
            ReviewId::new(),
            cmd.session_id,
            cmd.student_id,
            rating,
            cmd.comment,
            Timestamp::now(),
        );
        self.reviews.save(&review).await?;

        tracing::info!(
            review_id = %review.id(),
            session_id = %review.session_id(),
            rating = review.rating().value(),
            "review submitted"
        );

        // 3. Recompute reputation
        let previous_average = tutor.average_rating();
        let (average, review_count) = self.refresh_reputation(tutor.id()).await?;

        tracing::info!(
            tutor_id = %tutor.id(),
            previous = %previous_average,
            average = %average,
            reviews = review_count,
            "tutor rating recalculated"
        );

        // 4. Announce
        let submitted = ReviewSubmitted::from_review(&review, *tutor.id());
        publish_event(self.event_publisher.as_ref(), &submitted, &metadata).await;

        let recalculated = TutorRatingRecalculated {
            event_id: EventId::new(),
            tutor_id: *tutor.id(),
            previous_average,
            average_rating: average,
            review_count,
            recalculated_at: Timestamp::now(),
        };
        publish_event(self.event_publisher.as_ref(), &recalculated, &metadata).await;

        Ok(SubmitReviewResult {
            review,
            tutor_average: average,
            tutor_review_count: review_count,
        })
    }

    /// Mean of every review on the tutor's completed sessions, written back
    /// to the profile. Returns the average and the number of reviews counted.
    async fn refresh_reputation(
        &self,
        tutor_id: &TutorId,
    ) -> Result<(Decimal, usize), ReviewError> {
        let lock = self
            .tutor_locks
            .lock()
            .await
            .entry(*tutor_id)
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        let sessions = self
            .sessions
            .find_by_filter(
                &SessionFilter::for_tutor(*tutor_id).with_state(SessionState::Completed),
            )
            .await?;
        let ids: Vec<SessionId> = sessions.iter().map(|s| *s.id()).collect();
        let reviews = self.reviews.find_by_session_ids(&ids).await?;

        let average = average_rating(reviews.iter().map(Review::rating));
        self.tutors.store_average_rating(tutor_id, average).await?;

        Ok((average, reviews.len()))
    }
}
