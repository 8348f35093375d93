//! In-memory event bus.
//!
//! Delivers each published event to the handlers registered for its type,
//! in-process and in order, and keeps the most recent events for inspection.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-process event bus.
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe("session.completed.v1", handler);
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("session.completed.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<VecDeque<EventEnvelope>>,
    retention: usize,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus that keeps every published event.
    pub fn new() -> Self {
        Self::with_retention(usize::MAX)
    }

    /// Creates a bus that keeps only the last `retention` published events.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(VecDeque::new()),
            retention,
        }
    }

    /// All published events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Published events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Published events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Forgets every published event. Subscriptions are kept.
    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        {
            let mut published = self
                .published
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if self.retention > 0 {
                if published.len() >= self.retention {
                    published.pop_front();
                }
                published.push_back(event.clone());
            }
        }

        // Clone handlers to release lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&event.event_type)
                .cloned()
                .unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.subscribe_all(&[event_type], handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Session", json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Handler failed"))
        }

        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    #[tokio::test]
    async fn retention_keeps_only_latest_events() {
        let bus = InMemoryEventBus::with_retention(2);

        for id in ["a", "b", "c"] {
            bus.publish(envelope("session.accepted.v1", id)).await.unwrap();
        }

        let ids: Vec<_> = bus
            .published_events()
            .into_iter()
            .map(|e| e.aggregate_id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("session.accepted.v1", "s-1")).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("session.accepted.v1"));
        assert_eq!(bus.events_for_aggregate("s-1").len(), 1);
    }

    #[tokio::test]
    async fn events_of_type_filters_correctly() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("session.accepted.v1", "1")).await.unwrap();
        bus.publish(envelope("session.rejected.v1", "2")).await.unwrap();
        bus.publish(envelope("session.accepted.v1", "3")).await.unwrap();

        assert_eq!(bus.events_of_type("session.accepted.v1").len(), 2);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_multiple_types() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe_all(
            &["review.submitted.v1", "tutor.rating_recalculated.v1"],
            Arc::new(CountingHandler(counter.clone())),
        );

        bus.publish(envelope("review.submitted.v1", "1")).await.unwrap();
        bus.publish(envelope("tutor.rating_recalculated.v1", "2"))
            .await
            .unwrap();
        bus.publish(envelope("session.accepted.v1", "3")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn every_handler_runs_even_when_one_fails() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("session.completed.v1", Arc::new(FailingHandler));
        bus.subscribe(
            "session.completed.v1",
            Arc::new(CountingHandler(counter.clone())),
        );

        let result = bus.publish(envelope("session.completed.v1", "1")).await;

        assert!(result.unwrap_err().message.contains("FailingHandler"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn clear_keeps_subscriptions() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("x.v1", Arc::new(CountingHandler(counter.clone())));
        bus.publish_all(vec![envelope("x.v1", "1"), envelope("x.v1", "2")])
            .await
            .unwrap();

        bus.clear();
        bus.publish(envelope("x.v1", "3")).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
