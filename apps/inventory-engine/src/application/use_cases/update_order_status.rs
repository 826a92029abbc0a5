//! Update Order Status Use Case

use std::sync::Arc;

use crate::application::ports::EventPublisherPort;
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::repository::OrderRepository;
use crate::domain::order_lifecycle::value_objects::OrderStatus;
use crate::domain::shared::{ActorId, OrderId, Timestamp};

/// Use case for moving an order through the status table.
///
/// Validates the transition, persists the order with its appended history
/// row, and publishes the status event. Cancellation has its own use case
/// because it also releases stock.
pub struct UpdateOrderStatusUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    orders: Arc<O>,
    publisher: Arc<E>,
}

impl<O, E> UpdateOrderStatusUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new `UpdateOrderStatusUseCase`.
    pub const fn new(orders: Arc<O>, publisher: Arc<E>) -> Self {
        Self { orders, publisher }
    }

    /// Transition `order_id` to `target`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown order and `InvalidTransition` for
    /// any pair outside the table; the order is unchanged on failure.
    pub async fn execute(
        &self,
        order_id: &OrderId,
        target: OrderStatus,
        changed_by: ActorId,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<crate::domain::order_lifecycle::aggregate::Order, OrderError> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?;

        let from = order.status();
        order.transition_to(target, changed_by, reason, notes, Timestamp::now())?;
        self.orders.save(&order).await?;

        tracing::info!(
            order_id = %order.id(),
            from = %from,
            to = %target,
            "order status updated"
        );
        let events = order.drain_events();
        if let Err(e) = self.publisher.publish_order_events(events).await {
            tracing::error!("Failed to publish order events: {}", e);
        }

        Ok(order)
    }
}
