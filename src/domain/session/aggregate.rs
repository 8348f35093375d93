//! Session aggregate entity.
//!
//! A session is a student's booking with a tutor for one subject at one
//! point in time. It is created Pending and only changes through the
//! transitions below; it is never deleted.
//!
//! Every transition takes `now` explicitly so temporal rules can be
//! tested without a clock.

use crate::domain::foundation::{
    Money, PersonId, PolicyViolation, SessionId, StateMachine, SubjectId, Timestamp, TutorId,
    ValidationError,
};
use serde::{Deserialize, Serialize};

use super::{SessionError, SessionState};

/// Cancellation reason recorded when a student withdraws a pending request.
pub const WITHDRAWN_REASON: &str = "request withdrawn by student";

/// Session aggregate.
///
/// # Invariants
///
/// - `state` only moves along the [`SessionState`] graph; nothing re-enters Pending
/// - `rejection_reason` is non-empty iff `state` is Rejected
/// - `cancellation_reason` is non-empty iff `state` is Cancelled
/// - Completed only after `scheduled_at` has passed
/// - `version` grows by one per applied transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    subject_id: SubjectId,
    student_id: PersonId,
    tutor_id: TutorId,

    /// Set at creation, never changed.
    requested_at: Timestamp,
    scheduled_at: Timestamp,
    description: String,
    offered_price: Money,

    state: SessionState,
    rejection_reason: Option<String>,
    cancellation_reason: Option<String>,

    /// Optimistic concurrency counter.
    version: u32,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a new Pending session requested at `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn request(
        id: SessionId,
        subject_id: SubjectId,
        student_id: PersonId,
        tutor_id: TutorId,
        scheduled_at: Timestamp,
        description: impl Into<String>,
        offered_price: Money,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            subject_id,
            student_id,
            tutor_id,
            requested_at: now,
            scheduled_at,
            description: description.into(),
            offered_price,
            state: SessionState::Pending,
            rejection_reason: None,
            cancellation_reason: None,
            version: 1,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        subject_id: SubjectId,
        student_id: PersonId,
        tutor_id: TutorId,
        requested_at: Timestamp,
        scheduled_at: Timestamp,
        description: String,
        offered_price: Money,
        state: SessionState,
        rejection_reason: Option<String>,
        cancellation_reason: Option<String>,
        version: u32,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            subject_id,
            student_id,
            tutor_id,
            requested_at,
            scheduled_at,
            description,
            offered_price,
            state,
            rejection_reason,
            cancellation_reason,
            version,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn student_id(&self) -> &PersonId {
        &self.student_id
    }

    pub fn tutor_id(&self) -> &TutorId {
        &self.tutor_id
    }

    pub fn requested_at(&self) -> &Timestamp {
        &self.requested_at
    }

    pub fn scheduled_at(&self) -> &Timestamp {
        &self.scheduled_at
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn offered_price(&self) -> Money {
        self.offered_price
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True when the session time is strictly before `now`.
    pub fn is_past(&self, now: &Timestamp) -> bool {
        self.scheduled_at.is_before(now)
    }

    /// True when the session time is strictly after `now`.
    pub fn is_future(&self, now: &Timestamp) -> bool {
        self.scheduled_at.is_after(now)
    }

    pub fn is_student(&self, person_id: &PersonId) -> bool {
        &self.student_id == person_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Tutor accepts a pending request.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless Pending
    pub fn accept(&mut self, now: Timestamp) -> Result<(), SessionError> {
        self.apply(SessionState::Accepted, now)
    }

    /// Tutor rejects a pending request.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the reason is blank
    /// - `InvalidState` unless Pending
    pub fn reject(&mut self, reason: &str, now: Timestamp) -> Result<(), SessionError> {
        let reason = Self::require_reason(reason)?;
        self.apply(SessionState::Rejected, now)?;
        self.rejection_reason = Some(reason);
        Ok(())
    }

    /// Cancels an accepted session before it takes place.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the reason is blank
    /// - `InvalidState` unless Accepted
    /// - `PolicyViolation::SessionTimePassed` unless the session is still ahead
    pub fn cancel_accepted(&mut self, reason: &str, now: Timestamp) -> Result<(), SessionError> {
        let reason = Self::require_reason(reason)?;
        self.ensure_state(SessionState::Accepted, SessionState::Cancelled)?;
        if !self.is_future(&now) {
            return Err(SessionError::policy(PolicyViolation::SessionTimePassed));
        }
        self.apply(SessionState::Cancelled, now)?;
        self.cancellation_reason = Some(reason);
        Ok(())
    }

    /// Student withdraws a pending request before its time.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless Pending
    /// - `PolicyViolation::SessionTimePassed` unless the session is still ahead
    pub fn cancel_pending(&mut self, now: Timestamp) -> Result<(), SessionError> {
        self.ensure_state(SessionState::Pending, SessionState::Cancelled)?;
        if !self.is_future(&now) {
            return Err(SessionError::policy(PolicyViolation::SessionTimePassed));
        }
        self.apply(SessionState::Cancelled, now)?;
        self.cancellation_reason = Some(WITHDRAWN_REASON.to_string());
        Ok(())
    }

    /// Marks an accepted session as held.
    ///
    /// Time is checked before state, so a future session is refused with
    /// the same rule whatever its state.
    ///
    /// # Errors
    ///
    /// - `PolicyViolation::SessionNotYetHeld` unless the session time has passed
    /// - `PolicyViolation::SessionNotAccepted` unless Accepted
    pub fn complete_manually(&mut self, now: Timestamp) -> Result<(), SessionError> {
        if !self.is_past(&now) {
            return Err(SessionError::policy(PolicyViolation::SessionNotYetHeld));
        }
        if self.state != SessionState::Accepted {
            return Err(SessionError::policy(PolicyViolation::SessionNotAccepted));
        }
        self.apply(SessionState::Completed, now)
    }

    /// Completion applied by the overdue sweep.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless Accepted
    /// - `PolicyViolation::SessionNotYetHeld` unless the session time has passed
    pub fn complete_by_sweep(&mut self, now: Timestamp) -> Result<(), SessionError> {
        self.ensure_state(SessionState::Accepted, SessionState::Completed)?;
        if !self.is_past(&now) {
            return Err(SessionError::policy(PolicyViolation::SessionNotYetHeld));
        }
        self.apply(SessionState::Completed, now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_state(&self, expected: SessionState, target: SessionState) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::invalid_state(format!(
                "Cannot transition from {} to {}",
                self.state, target
            )))
        }
    }

    fn apply(&mut self, target: SessionState, now: Timestamp) -> Result<(), SessionError> {
        self.state = self.state.transition_to(target)?;
        self.version += 1;
        self.updated_at = now;
        Ok(())
    }

    fn require_reason(reason: &str) -> Result<String, SessionError> {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("reason").into());
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn pending_at(scheduled_at: Timestamp, now: Timestamp) -> Session {
        Session::request(
            SessionId::new(),
            SubjectId::new(),
            PersonId::new(),
            TutorId::new(),
            scheduled_at,
            "Derivatives review",
            Money::new(Decimal::new(2500, 2)).unwrap(),
            now,
        )
    }

    fn future_pending() -> (Session, Timestamp) {
        let now = Timestamp::now();
        (pending_at(now.add_days(2), now), now)
    }

    fn accepted_at(scheduled_at: Timestamp, now: Timestamp) -> Session {
        let mut session = pending_at(scheduled_at, now);
        session.accept(now).unwrap();
        session
    }

    // ══════════════════════════════════════════════════════════════
    // Request
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn request_starts_pending_at_version_one() {
        let (session, now) = future_pending();

        assert_eq!(session.state(), SessionState::Pending);
        assert_eq!(session.version(), 1);
        assert_eq!(session.requested_at(), &now);
        assert!(session.rejection_reason().is_none());
        assert!(session.cancellation_reason().is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // Accept / Reject
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn accept_moves_pending_to_accepted() {
        let (mut session, now) = future_pending();

        session.accept(now).unwrap();

        assert_eq!(session.state(), SessionState::Accepted);
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn accept_twice_is_invalid_state() {
        let (mut session, now) = future_pending();
        session.accept(now).unwrap();

        let result = session.accept(now);

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn reject_stores_trimmed_reason() {
        let (mut session, now) = future_pending();

        session.reject("  schedule conflict ", now).unwrap();

        assert_eq!(session.state(), SessionState::Rejected);
        assert_eq!(session.rejection_reason(), Some("schedule conflict"));
    }

    #[test]
    fn reject_requires_reason() {
        let (mut session, now) = future_pending();

        let result = session.reject("   ", now);

        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
        assert_eq!(session.state(), SessionState::Pending);
    }

    #[test]
    fn reject_after_accept_is_invalid_state() {
        let (mut session, now) = future_pending();
        session.accept(now).unwrap();

        assert!(matches!(
            session.reject("changed my mind", now),
            Err(SessionError::InvalidState(_))
        ));
        assert!(session.rejection_reason().is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // Cancellation
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn cancel_accepted_before_time_stores_reason() {
        let now = Timestamp::now();
        let mut session = accepted_at(now.add_hours(3), now);

        session.cancel_accepted("sick", now).unwrap();

        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(session.cancellation_reason(), Some("sick"));
    }

    #[test]
    fn cancel_accepted_after_time_is_policy_violation() {
        let now = Timestamp::now();
        let mut session = accepted_at(now.minus_hours(1), now.minus_days(1));

        let result = session.cancel_accepted("too late", now);

        assert_eq!(
            result,
            Err(SessionError::policy(PolicyViolation::SessionTimePassed))
        );
        assert_eq!(session.state(), SessionState::Accepted);
    }

    #[test]
    fn cancel_accepted_exactly_at_time_is_refused() {
        let now = Timestamp::now();
        let mut session = accepted_at(now, now.minus_days(1));

        assert!(matches!(
            session.cancel_accepted("now", now),
            Err(SessionError::PolicyViolation(_))
        ));
    }

    #[test]
    fn cancel_accepted_on_pending_is_invalid_state() {
        let (mut session, now) = future_pending();

        assert!(matches!(
            session.cancel_accepted("oops", now),
            Err(SessionError::InvalidState(_))
        ));
    }

    #[test]
    fn cancel_pending_records_withdrawal() {
        let (mut session, now) = future_pending();

        session.cancel_pending(now).unwrap();

        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(session.cancellation_reason(), Some(WITHDRAWN_REASON));
    }

    #[test]
    fn cancel_pending_checks_state_before_time() {
        let now = Timestamp::now();
        let mut session = accepted_at(now.minus_hours(2), now.minus_days(1));

        assert!(matches!(
            session.cancel_pending(now),
            Err(SessionError::InvalidState(_))
        ));
    }

    #[test]
    fn cancel_pending_after_time_is_policy_violation() {
        let now = Timestamp::now();
        let mut session = pending_at(now.minus_hours(2), now.minus_days(1));

        assert_eq!(
            session.cancel_pending(now),
            Err(SessionError::policy(PolicyViolation::SessionTimePassed))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Completion
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn complete_manually_after_time() {
        let now = Timestamp::now();
        let mut session = accepted_at(now.minus_hours(1), now.minus_days(1));

        session.complete_manually(now).unwrap();

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.version(), 3);
        assert_eq!(session.updated_at(), &now);
    }

    #[test]
    fn complete_manually_future_session_is_refused_in_any_state() {
        let now = Timestamp::now();
        let mut pending = pending_at(now.add_days(1), now);
        let mut accepted = accepted_at(now.add_days(1), now);

        for session in [&mut pending, &mut accepted] {
            assert_eq!(
                session.complete_manually(now),
                Err(SessionError::policy(PolicyViolation::SessionNotYetHeld))
            );
        }
    }

    #[test]
    fn complete_manually_past_pending_is_not_accepted() {
        let now = Timestamp::now();
        let mut session = pending_at(now.minus_hours(1), now.minus_days(1));

        assert_eq!(
            session.complete_manually(now),
            Err(SessionError::policy(PolicyViolation::SessionNotAccepted))
        );
    }

    #[test]
    fn complete_by_sweep_requires_accepted() {
        let now = Timestamp::now();
        let mut session = pending_at(now.minus_hours(1), now.minus_days(1));

        assert!(matches!(
            session.complete_by_sweep(now),
            Err(SessionError::InvalidState(_))
        ));
    }

    #[test]
    fn complete_by_sweep_refuses_future_session() {
        let now = Timestamp::now();
        let mut session = accepted_at(now.add_hours(1), now);

        assert!(matches!(
            session.complete_by_sweep(now),
            Err(SessionError::PolicyViolation(PolicyViolation::SessionNotYetHeld))
        ));
    }

    #[test]
    fn terminal_sessions_refuse_everything() {
        let now = Timestamp::now();
        let mut session = accepted_at(now.minus_hours(1), now.minus_days(1));
        session.complete_manually(now).unwrap();

        assert!(session.accept(now).is_err());
        assert!(session.reject("no", now).is_err());
        assert!(session.cancel_accepted("no", now).is_err());
        assert!(session.cancel_pending(now).is_err());
        assert!(session.complete_by_sweep(now).is_err());
        assert_eq!(session.state(), SessionState::Completed);
    }

    // ══════════════════════════════════════════════════════════════
    // Property: the state graph is never left, Pending never re-entered
    // ══════════════════════════════════════════════════════════════

    #[derive(Debug, Clone)]
    enum Op {
        Accept,
        Reject,
        CancelAccepted,
        CancelPending,
        CompleteManually,
        CompleteBySweep,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Accept),
            Just(Op::Reject),
            Just(Op::CancelAccepted),
            Just(Op::CancelPending),
            Just(Op::CompleteManually),
            Just(Op::CompleteBySweep),
        ]
    }

    proptest! {
        #[test]
        fn transitions_follow_the_state_graph(
            ops in proptest::collection::vec((op_strategy(), -48i64..48), 1..20),
            scheduled_offset in -24i64..24,
        ) {
            let origin = Timestamp::now();
            let mut session = pending_at(origin.add_hours(scheduled_offset), origin);

            for (op, hour) in ops {
                let now = origin.add_hours(hour);
                let before = session.state();
                let version = session.version();

                let result = match op {
                    Op::Accept => session.accept(now),
                    Op::Reject => session.reject("reason", now),
                    Op::CancelAccepted => session.cancel_accepted("reason", now),
                    Op::CancelPending => session.cancel_pending(now),
                    Op::CompleteManually => session.complete_manually(now),
                    Op::CompleteBySweep => session.complete_by_sweep(now),
                };

                let after = session.state();
                if result.is_ok() || before != SessionState::Pending {
                    prop_assert_ne!(after, SessionState::Pending);
                }
                if result.is_ok() {
                    prop_assert!(before.can_transition_to(&after));
                    prop_assert_eq!(session.version(), version + 1);
                } else {
                    prop_assert_eq!(before, after);
                    prop_assert_eq!(session.version(), version);
                }
                prop_assert_eq!(
                    session.rejection_reason().is_some(),
                    after == SessionState::Rejected
                );
                prop_assert_eq!(
                    session.cancellation_reason().is_some(),
                    after == SessionState::Cancelled
                );
                if after == SessionState::Completed && before != SessionState::Completed {
                    prop_assert!(session.is_past(&now));
                }
            }
        }
    }
}
