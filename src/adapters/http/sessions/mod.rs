//! HTTP adapter for session lifecycle endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ListSessionsParams, ReasonRequest, RequestSessionRequest, SessionListResponse, SessionResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
