//! Publishing events after a committed change.

use crate::domain::foundation::{CommandMetadata, SerializableDomainEvent};
use crate::ports::EventPublisher;

/// Publishes `event` stamped with `metadata`.
///
/// The state change is already persisted when this runs, so failures are
/// logged at `warn` and swallowed.
pub(crate) async fn publish_event<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) where
    E: SerializableDomainEvent,
{
    let envelope = match event.to_envelope() {
        Ok(envelope) => envelope.with_metadata(metadata),
        Err(e) => {
            tracing::warn!(
                event_type = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                error = %e,
                "failed to serialize domain event"
            );
            return;
        }
    };

    let event_type = envelope.event_type.clone();
    let aggregate_id = envelope.aggregate_id.clone();
    if let Err(e) = publisher.publish(envelope).await {
        tracing::warn!(
            event_type = %event_type,
            aggregate_id = %aggregate_id,
            error = %e,
            "failed to publish domain event"
        );
    }
}
