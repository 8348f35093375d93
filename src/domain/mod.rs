//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `directory` - Subjects, people and tutor profiles owned by other services
//! - `session` - Tutoring session lifecycle and events
//! - `review` - Session reviews and tutor reputation

pub mod directory;
pub mod foundation;
pub mod review;
pub mod session;
