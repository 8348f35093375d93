//! Adapters - port implementations and outer surfaces.
//!
//! - `memory` - in-memory repositories and directory
//! - `postgres` - sqlx/PostgreSQL repositories and directory
//! - `events` - in-process event bus and logging subscriber
//! - `scheduler` - completion sweep timer
//! - `http` - axum REST API

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use events::InMemoryEventBus;
