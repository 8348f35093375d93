//! State machine trait for lifecycle enums.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors list the legal targets of each state; validated
/// transitions and terminal detection come for free.
///
/// ```ignore
/// let next = SessionState::Pending.transition_to(SessionState::Accepted)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> &'static [Self];

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if `target` is not reachable from `self`
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            )
            .with_detail("from", format!("{:?}", self))
            .with_detail("to", format!("{:?}", target)))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Off,
        On,
        Broken,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> &'static [Self] {
            match self {
                Light::Off => &[Light::On, Light::Broken],
                Light::On => &[Light::Off, Light::Broken],
                Light::Broken => &[],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Off.transition_to(Light::On).unwrap(), Light::On);
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Light::Broken.transition_to(Light::On).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.details.get("from"), Some(&"Broken".to_string()));
    }

    fn terminal_states<S: StateMachine>(states: &[S]) -> Vec<S> {
        states.iter().copied().filter(StateMachine::is_terminal).collect()
    }

    #[test]
    fn generic_callers_see_static_transition_tables() {
        let all = [Light::Off, Light::On, Light::Broken];
        assert_eq!(terminal_states(&all), vec![Light::Broken]);
    }

    #[test]
    fn is_terminal_follows_transition_table() {
        assert!(Light::Broken.is_terminal());
        assert!(!Light::Off.is_terminal());
    }
}
