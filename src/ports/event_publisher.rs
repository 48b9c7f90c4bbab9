//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the engine notifies subscribers (a live
//! dashboard, a chat channel) without knowing the transport.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Delivery is best-effort from the engine's point of view: state is
/// committed before anything is published, and a failed publish must
/// never corrupt or roll back persisted state. Implementations should
/// still report failures so callers can log them.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order, best-effort.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}
}
