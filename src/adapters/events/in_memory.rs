//! In-memory event bus.
//!
//! Synchronous, deterministic delivery for tests and single-process
//! deployments. Published envelopes are captured for assertions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory event bus.
///
/// Captures every published envelope; test code asserts against the
/// captured list instead of wiring real subscribers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventBus {
    published: Arc<RwLock<Vec<EventEnvelope>>>,
    fail_publish: bool,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus whose publishes always fail (for testing the
    /// fire-and-forget contract).
    pub fn failing() -> Self {
        Self {
            published: Arc::new(RwLock::new(Vec::new())),
            fail_publish: true,
        }
    }

    /// Returns all published events (for test assertions).
    pub async fn published_events(&self) -> Vec<EventEnvelope> {
        self.published.read().await.clone()
    }

    /// Returns events of a specific type.
    pub async fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Checks if a specific event type was published.
    pub async fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .await
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Returns count of published events.
    pub async fn event_count(&self) -> usize {
        self.published.read().await.len()
    }

    /// Clears all published events (for test isolation).
    pub async fn clear(&self) {
        self.published.write().await.clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published.write().await.push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, EventMetadata, Timestamp};
    use serde_json::json;

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: EventId::new(),
            event_type: event_type.to_string(),
            aggregate_id: "agg-1".to_string(),
            aggregate_type: "Question".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    #[tokio::test]
    async fn publish_captures_envelope() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("question.submitted.v1")).await.unwrap();

        assert_eq!(bus.event_count().await, 1);
        assert!(bus.has_event("question.submitted.v1").await);
    }

    #[tokio::test]
    async fn publish_all_preserves_order() {
        let bus = InMemoryEventBus::new();
        bus.publish_all(vec![envelope("a.v1"), envelope("b.v1")])
            .await
            .unwrap();

        let events = bus.published_events().await;
        assert_eq!(events[0].event_type, "a.v1");
        assert_eq!(events[1].event_type, "b.v1");
    }

    #[tokio::test]
    async fn events_of_type_filters() {
        let bus = InMemoryEventBus::new();
        bus.publish_all(vec![envelope("a.v1"), envelope("b.v1"), envelope("a.v1")])
            .await
            .unwrap();

        assert_eq!(bus.events_of_type("a.v1").await.len(), 2);
    }

    #[tokio::test]
    async fn failing_bus_rejects_publish() {
        let bus = InMemoryEventBus::failing();
        assert!(bus.publish(envelope("a.v1")).await.is_err());
        assert_eq!(bus.event_count().await, 0);
    }

    #[tokio::test]
    async fn clear_resets_capture() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("a.v1")).await.unwrap();
        bus.clear().await;
        assert_eq!(bus.event_count().await, 0);
    }
}
