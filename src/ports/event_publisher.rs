//! EventPublisher port - how the booking core announces what happened.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Handlers publish after the state change is persisted. A publish failure
/// is reported to the caller, who decides whether it matters.
///
/// ```ignore
/// let envelope = SessionAccepted::from_session(&session).to_envelope()?;
/// publisher.publish(envelope.with_metadata(&metadata)).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order. Stops at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }
}
