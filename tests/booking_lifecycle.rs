//! End-to-end booking lifecycle over the in-memory adapters:
//! request, accept, cancel, complete, review and the eligibility gate.

mod common;

use rust_decimal::Decimal;

use common::Harness;
use tutor_booking::application::handlers::{
    CancelSessionCommand, CheckEligibilityQuery, CompleteSessionCommand, ListTutorReviewsQuery,
};
use tutor_booking::domain::foundation::{PolicyViolation, Timestamp};
use tutor_booking::domain::session::{SessionError, SessionState};

#[tokio::test]
async fn completed_session_blocks_requests_until_reviewed() {
    let h = Harness::new().await;
    let session = h.booked(Timestamp::now().minus_hours(2)).await;

    let completed = h
        .app
        .sessions
        .complete
        .handle(
            CompleteSessionCommand {
                session_id: *session.id(),
            },
            h.metadata(),
        )
        .await
        .unwrap();
    assert_eq!(completed.session.state(), SessionState::Completed);

    let blocked = h.request(Timestamp::now().add_days(3)).await.unwrap_err();
    assert_eq!(
        blocked,
        SessionError::PolicyViolation(PolicyViolation::PendingRatingsOutstanding)
    );
    let eligibility = h
        .app
        .reviews
        .eligibility
        .handle(CheckEligibilityQuery {
            student_id: h.student_id,
        })
        .await
        .unwrap();
    assert_eq!(eligibility.pending_sessions(), &[*session.id()]);

    let review = h.review(*session.id(), 5).await.unwrap();
    assert_eq!(review.tutor_average, Decimal::new(50, 1));

    let next = h.request(Timestamp::now().add_days(3)).await.unwrap();
    assert_eq!(next.state(), SessionState::Pending);
}

#[tokio::test]
async fn new_review_recomputes_tutor_average() {
    let h = Harness::new().await;
    let past = Timestamp::now().minus_days(1);
    let sessions = [h.booked(past).await, h.booked(past).await, h.booked(past).await];
    for session in &sessions {
        h.app
            .sessions
            .complete
            .handle(
                CompleteSessionCommand {
                    session_id: *session.id(),
                },
                h.metadata(),
            )
            .await
            .unwrap();
    }

    h.review(*sessions[0].id(), 4).await.unwrap();
    h.review(*sessions[1].id(), 5).await.unwrap();
    let last = h.review(*sessions[2].id(), 3).await.unwrap();

    assert_eq!(last.tutor_average, Decimal::new(40, 1));
    assert_eq!(last.tutor_review_count, 3);

    let listing = h
        .app
        .reviews
        .list
        .handle(ListTutorReviewsQuery { tutor_id: h.tutor_id })
        .await
        .unwrap();
    assert_eq!(listing.average_rating, Decimal::new(40, 1));
    assert_eq!(listing.reviews.len(), 3);
    assert!(h.bus.has_event("tutor.rating_recalculated.v1"));
}

#[tokio::test]
async fn cannot_complete_a_future_session_or_cancel_a_past_one() {
    let h = Harness::new().await;
    let upcoming = h.booked(Timestamp::now().add_days(2)).await;
    let finished = h.booked(Timestamp::now().minus_hours(1)).await;

    let early = h
        .app
        .sessions
        .complete
        .handle(
            CompleteSessionCommand {
                session_id: *upcoming.id(),
            },
            h.metadata(),
        )
        .await
        .unwrap_err();
    let late = h
        .app
        .sessions
        .cancel
        .handle(
            CancelSessionCommand {
                session_id: *finished.id(),
                reason: "forgot".to_string(),
            },
            h.metadata(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        early,
        SessionError::PolicyViolation(PolicyViolation::SessionNotYetHeld)
    );
    assert_eq!(
        late,
        SessionError::PolicyViolation(PolicyViolation::SessionTimePassed)
    );
    assert_eq!(h.stored(upcoming.id()).await.state(), SessionState::Accepted);
    assert_eq!(h.stored(finished.id()).await.state(), SessionState::Accepted);
}

#[tokio::test]
async fn cancelling_an_upcoming_session_records_reason() {
    let h = Harness::new().await;
    let session = h.booked(Timestamp::now().add_days(2)).await;

    let result = h
        .app
        .sessions
        .cancel
        .handle(
            CancelSessionCommand {
                session_id: *session.id(),
                reason: "  tutor is ill  ".to_string(),
            },
            h.metadata(),
        )
        .await
        .unwrap();

    assert_eq!(result.session.state(), SessionState::Cancelled);
    assert_eq!(result.session.cancellation_reason(), Some("tutor is ill"));
    assert_eq!(result.session.version(), 3);
    assert!(h.bus.has_event("session.cancelled.v1"));
}
