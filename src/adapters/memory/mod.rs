//! In-memory adapters for every persistence and directory port.

mod directory;
mod review_repository;
mod session_repository;

pub use directory::InMemoryDirectory;
pub use review_repository::InMemoryReviewRepository;
pub use session_repository::InMemorySessionRepository;
