//! Event handler that writes every event it receives to the log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventHandler;

/// Every event type the booking core publishes.
pub const BOOKING_EVENT_TYPES: [&str; 7] = [
    "session.requested.v1",
    "session.accepted.v1",
    "session.rejected.v1",
    "session.cancelled.v1",
    "session.completed.v1",
    "review.submitted.v1",
    "tutor.rating_recalculated.v1",
];

/// Logs events at `info` with their routing fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

#[async_trait]
impl EventHandler for TracingEventHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            source = event.metadata.source.as_deref().unwrap_or("unknown"),
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or(""),
            "domain event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TracingEventHandler"
    }
}
