//! EventSubscriber port - registering interest in domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Handlers must tolerate seeing the same event twice, and a failing
/// handler must not affect the others.
///
/// ```ignore
/// struct RatingAuditLog;
///
/// #[async_trait]
/// impl EventHandler for RatingAuditLog {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: TutorRatingRecalculated = event.payload_as()?;
///         // ...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "RatingAuditLog"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events by type.
///
/// ```ignore
/// subscriber.subscribe("session.completed.v1", reminder);
/// subscriber.subscribe_all(&["review.submitted.v1", "tutor.rating_recalculated.v1"], audit);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// An event bus both publishes and subscribes.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
