//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over ports.

mod events;
pub mod review;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use review::{
    CheckEligibilityHandler, CheckEligibilityQuery, ListTutorReviewsHandler,
    ListTutorReviewsQuery, ReviewEligibilityChecker, SubmitReviewCommand, SubmitReviewHandler,
    SubmitReviewResult, TutorReviewView, TutorReviews,
};
pub use session::{
    AcceptSessionCommand, AcceptSessionHandler, AcceptSessionResult, CancelSessionCommand,
    CancelSessionHandler, CancelSessionResult, CompleteOverdueSessionsHandler,
    CompleteSessionCommand, CompleteSessionHandler, CompleteSessionResult, GetSessionHandler,
    GetSessionQuery, ListSessionsHandler, ListSessionsQuery, RejectSessionCommand,
    RejectSessionHandler, RejectSessionResult, RequestSessionCommand, RequestSessionHandler,
    RequestSessionResult, SessionSummary, SweepReport, WithdrawRequestCommand,
    WithdrawRequestHandler, WithdrawRequestResult,
};
