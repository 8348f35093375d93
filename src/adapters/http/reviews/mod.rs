//! HTTP adapter for reviews, tutor reputation and the eligibility gate.

mod dto;
mod handlers;
mod routes;

pub use dto::{ReviewResponse, SubmitReviewRequest};
pub use handlers::ReviewHandlers;
pub use routes::review_routes;
