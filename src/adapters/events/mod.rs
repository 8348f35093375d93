//! Event bus adapters.
//!
//! - `InMemoryEventBus` - in-process publish/subscribe
//! - `TracingEventHandler` - writes every booking event to the log

mod in_memory;
mod tracing_handler;

pub use in_memory::InMemoryEventBus;
pub use tracing_handler::{TracingEventHandler, BOOKING_EVENT_TYPES};
