//! Cancel Order Use Case
//!
//! The cross-context flow: cancel the order, then release every active
//! hold it still has through the stock engine.

use std::sync::Arc;

use crate::application::ports::EventPublisherPort;
use crate::application::services::StockEngine;
use crate::domain::order_lifecycle::aggregate::Order;
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::repository::OrderRepository;
use crate::domain::shared::{ActorId, OrderId, Timestamp};
use crate::domain::stock_control::errors::StockError;
use crate::domain::stock_control::repository::InventoryStore;

/// Outcome of a cancellation, including how the order's holds fared.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    /// The cancelled order.
    pub order: Order,
    /// Reservations that were released by this call.
    pub released: usize,
    /// Reservations skipped because a concurrent release or expiry got
    /// there first.
    pub already_settled: usize,
    /// Reservations left behind on retryable contention; the expiry sweep
    /// reconciles them.
    pub deferred: usize,
}

/// Use case for cancelling an order and releasing its stock.
pub struct CancelOrderUseCase<O, S, E>
where
    O: OrderRepository,
    S: InventoryStore,
    E: EventPublisherPort,
{
    orders: Arc<O>,
    engine: Arc<StockEngine<S, E>>,
    publisher: Arc<E>,
}

impl<O, S, E> CancelOrderUseCase<O, S, E>
where
    O: OrderRepository,
    S: InventoryStore,
    E: EventPublisherPort,
{
    /// Create a new `CancelOrderUseCase`.
    pub const fn new(orders: Arc<O>, engine: Arc<StockEngine<S, E>>, publisher: Arc<E>) -> Self {
        Self {
            orders,
            engine,
            publisher,
        }
    }

    /// Cancel `order_id` and release each of its active reservations.
    ///
    /// The order transition commits first; hold releases follow, each in
    /// its own atomic stock operation. A hold that a concurrent release or
    /// expiry already settled is skipped; a contended one is left for the
    /// sweep. Neither undoes the cancellation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown order and `CannotCancel` when the
    /// order is already Cancelled, is Delivered, or is Refunded.
    pub async fn execute(
        &self,
        order_id: &OrderId,
        reason: impl Into<String> + Send,
        cancelled_by: ActorId,
    ) -> Result<CancelOutcome, OrderError> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.clone(),
            })?;

        let reason = reason.into();
        order.cancel(cancelled_by, reason.clone(), Timestamp::now())?;
        self.orders.save(&order).await?;

        tracing::info!(order_id = %order.id(), reason = %reason, "order cancelled");
        let events = order.drain_events();
        if let Err(e) = self.publisher.publish_order_events(events).await {
            tracing::error!("Failed to publish order events: {}", e);
        }

        let (released, already_settled, deferred) =
            self.release_holds(order_id, &reason).await?;

        Ok(CancelOutcome {
            order,
            released,
            already_settled,
            deferred,
        })
    }

    async fn release_holds(
        &self,
        order_id: &OrderId,
        reason: &str,
    ) -> Result<(usize, usize, usize), OrderError> {
        let reservations = self.engine.get_reservations_for_order(order_id).await?;

        let mut released = 0;
        let mut already_settled = 0;
        let mut deferred = 0;
        for reservation in reservations
            .iter()
            .filter(|r| r.status().is_active())
        {
            match self
                .engine
                .release(reservation.id(), Some(reason.to_string()))
                .await
            {
                Ok(_) => released += 1,
                Err(StockError::InvalidReservationState { .. }) => {
                    // A concurrent release or the expiry sweep won the
                    // race; the units are already back.
                    already_settled += 1;
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        reservation_id = %reservation.id(),
                        order_id = %order_id,
                        "hold contended during cancellation, leaving it to the sweep: {}",
                        e
                    );
                    deferred += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok((released, already_settled, deferred))
    }
}
