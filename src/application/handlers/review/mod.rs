//! Review command and query handlers.

mod check_eligibility;
mod list_tutor_reviews;
mod submit_review;

pub use check_eligibility::{CheckEligibilityHandler, CheckEligibilityQuery, ReviewEligibilityChecker};
pub use list_tutor_reviews::{
    ListTutorReviewsHandler, ListTutorReviewsQuery, TutorReviewView, TutorReviews,
};
pub use submit_review::{SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult};
