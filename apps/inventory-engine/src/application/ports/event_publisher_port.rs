//! Event Publisher Port (Driven Port)
//!
//! Interface for publishing domain events to external systems. Publishing
//! happens after the owning transaction commits; a publish failure is
//! logged by the caller and never rolls the commit back.

use async_trait::async_trait;

use crate::domain::order_lifecycle::events::OrderEvent;
use crate::domain::stock_control::events::StockEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Connection error.
    #[error("Event publish connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed {
        /// Error details.
        message: String,
    },
}

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish stock events.
    async fn publish_stock_events(&self, events: Vec<StockEvent>) -> Result<(), EventPublishError>;

    /// Publish order events.
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;

    /// Publish a single stock event.
    async fn publish_stock_event(&self, event: StockEvent) -> Result<(), EventPublishError> {
        self.publish_stock_events(vec![event]).await
    }

    /// Publish a single order event.
    async fn publish_order_event(&self, event: OrderEvent) -> Result<(), EventPublishError> {
        self.publish_order_events(vec![event]).await
    }
}

/// No-op event publisher for testing and embedding without a bus.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish_stock_events(
        &self,
        _events: Vec<StockEvent>,
    ) -> Result<(), EventPublishError> {
        Ok(())
    }

    async fn publish_order_events(
        &self,
        _events: Vec<OrderEvent>,
    ) -> Result<(), EventPublishError> {
        Ok(())
    }
}
