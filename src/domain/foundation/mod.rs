//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and event plumbing
//! that form the vocabulary of the booking domain.

mod command;
mod errors;
mod events;
mod ids;
mod money;
mod policy;
mod rating;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{PersonId, ReviewId, SessionId, SubjectId, TutorId};
pub use money::{Money, MONEY_SCALE};
pub use policy::PolicyViolation;
pub use rating::{Rating, MAX_RATING, MIN_RATING};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
