//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the booking core and the outside world. Adapters implement these ports.
//!
//! ## Directory Ports
//!
//! - `SubjectDirectory`, `PersonDirectory`, `TutorDirectory` - lookups into
//!   records owned by other services
//!
//! ## Persistence Ports
//!
//! - `SessionRepository` - Sessions, with optimistic updates
//! - `ReviewRepository` - Reviews, one per session
//!
//! ## Policy Ports
//!
//! - `EligibilityChecker` - pending-ratings gate before a new request
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events

mod directory;
mod eligibility_checker;
mod event_publisher;
mod event_subscriber;
mod review_repository;
mod session_repository;

pub use directory::{PersonDirectory, SubjectDirectory, TutorDirectory};
pub use eligibility_checker::{Eligibility, EligibilityChecker};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use review_repository::ReviewRepository;
pub use session_repository::{Participant, SessionFilter, SessionRepository};
