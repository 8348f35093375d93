//! Review domain module.
//!
//! Students rate completed sessions; each new rating recomputes the
//! tutor's average from scratch.

mod aggregate;
mod errors;
mod events;
mod reputation;

pub use aggregate::Review;
pub use errors::ReviewError;
pub use events::{ReviewSubmitted, TutorRatingRecalculated};
pub use reputation::{average_rating, AVERAGE_RATING_SCALE};
