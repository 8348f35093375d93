//! Session domain module.
//!
//! The tutoring-session lifecycle: a student requests, the tutor accepts or
//! rejects, either side cancels ahead of time, and the session is completed
//! once its time has passed.
//!
//! # Events
//!
//! - `SessionRequested`
//! - `SessionAccepted`
//! - `SessionRejected`
//! - `SessionCancelled`
//! - `SessionCompleted` (source `manual` or `sweep`)

mod aggregate;
mod errors;
mod events;
mod state;

pub use aggregate::{Session, WITHDRAWN_REASON};
pub use errors::SessionError;
pub use events::{
    CompletionSource, SessionAccepted, SessionCancelled, SessionCompleted, SessionRejected,
    SessionRequested,
};
pub use state::SessionState;
