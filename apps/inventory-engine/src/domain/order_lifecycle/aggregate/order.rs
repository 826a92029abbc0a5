//! Order Aggregate Root
//!
//! The order aggregate manages status transitions and keeps the immutable
//! status history. Quantities live in the stock context; the order only
//! carries its line items so cancellation knows what was held.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::events::{OrderCancelled, OrderEvent, OrderStatusChanged};
use crate::domain::order_lifecycle::services::OrderStateMachine;
use crate::domain::order_lifecycle::value_objects::{OrderStatus, StatusChange};
use crate::domain::shared::{ActorId, OrderId, Quantity, SkuId, Timestamp};

/// One line item of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// SKU key of the ordered item.
    pub sku_id: SkuId,
    /// Ordered units.
    pub quantity: Quantity,
}

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Actor placing the order.
    pub placed_by: ActorId,
    /// Line items; at least one is required.
    pub lines: Vec<OrderLine>,
}

impl CreateOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns error if there are no lines or a line quantity is not
    /// positive.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::InvalidParameters {
                field: "lines".to_string(),
                message: "order needs at least one line item".to_string(),
            });
        }
        for line in &self.lines {
            line.quantity
                .validate_positive("quantity")
                .map_err(|e| OrderError::InvalidParameters {
                    field: "lines".to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    placed_by: ActorId,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    history: Vec<StatusChange>,
    cancelled_at: Option<Timestamp>,
    cancellation_reason: Option<String>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Create a new order in Pending status.
    ///
    /// Appends the initial history row and generates no transition event;
    /// the order's existence is announced by its creator, not this engine.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn new(cmd: CreateOrderCommand, now: Timestamp) -> Result<Self, OrderError> {
        cmd.validate()?;

        let id = OrderId::generate();
        let initial = StatusChange::record(
            id.clone(),
            OrderStatus::Pending,
            OrderStatus::Pending,
            cmd.placed_by.clone(),
            now,
        )
        .with_reason("Order created");

        Ok(Self {
            id,
            placed_by: cmd.placed_by,
            lines: cmd.lines,
            status: OrderStatus::Pending,
            history: vec![initial],
            cancelled_at: None,
            cancellation_reason: None,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the order id.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Actor that placed the order.
    #[must_use]
    pub const fn placed_by(&self) -> &ActorId {
        &self.placed_by
    }

    /// Line items.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Full status history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[StatusChange] {
        &self.history
    }

    /// When the order was cancelled, if it was.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<Timestamp> {
        self.cancelled_at
    }

    /// Reason given at cancellation, if any.
    #[must_use]
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Take the accumulated domain events, leaving none behind.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Transition to a target status through the modelled table.
    ///
    /// Appends a history row and a status-changed event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for any pair not in the table.
    pub fn transition_to(
        &mut self,
        target: OrderStatus,
        changed_by: ActorId,
        reason: Option<String>,
        notes: Option<String>,
        now: Timestamp,
    ) -> Result<(), OrderError> {
        OrderStateMachine::validate_transition(self.status, target)?;
        self.apply_transition(target, changed_by, reason, notes, now);
        Ok(())
    }

    /// Cancel the order.
    ///
    /// Cancellation is the privileged transition: it bypasses the table
    /// for Shipped orders but is rejected outright once the order is
    /// Cancelled, Delivered, or Refunded.
    ///
    /// # Errors
    ///
    /// Returns `CannotCancel` if the order is not cancellable.
    pub fn cancel(
        &mut self,
        cancelled_by: ActorId,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), OrderError> {
        if !self.status.is_cancellable() {
            return Err(OrderError::CannotCancel {
                order_id: self.id.clone(),
                status: self.status,
            });
        }
        let reason = reason.into();
        self.cancelled_at = Some(now);
        self.cancellation_reason = Some(reason.clone());
        let from = self.status;
        self.apply_transition(
            OrderStatus::Cancelled,
            cancelled_by.clone(),
            Some(reason.clone()),
            None,
            now,
        );
        // apply_transition pushed the generic status event; replace it
        // with the cancellation event carrying the reason.
        self.events.pop();
        self.events.push(OrderEvent::Cancelled(OrderCancelled {
            order_id: self.id.clone(),
            from_status: from,
            cancelled_by,
            reason,
            occurred_at: now,
        }));
        Ok(())
    }

    fn apply_transition(
        &mut self,
        target: OrderStatus,
        changed_by: ActorId,
        reason: Option<String>,
        notes: Option<String>,
        now: Timestamp,
    ) {
        let from = self.status;
        self.status = target;
        self.updated_at = now;

        let mut change = StatusChange::record(self.id.clone(), from, target, changed_by, now);
        if let Some(reason) = &reason {
            change = change.with_reason(reason.clone());
        }
        if let Some(notes) = &notes {
            change = change.with_notes(notes.clone());
        }
        self.history.push(change);

        self.events.push(OrderEvent::StatusChanged(OrderStatusChanged {
            order_id: self.id.clone(),
            from_status: from,
            to_status: target,
            occurred_at: now,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            CreateOrderCommand {
                placed_by: ActorId::new("user-1"),
                lines: vec![OrderLine {
                    sku_id: SkuId::new("sku-1"),
                    quantity: Quantity::new(2),
                }],
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_order_is_pending_with_initial_history() {
        let o = order();
        assert_eq!(o.status(), OrderStatus::Pending);
        assert_eq!(o.history().len(), 1);
        assert_eq!(o.history()[0].from_status, OrderStatus::Pending);
        assert_eq!(o.history()[0].to_status, OrderStatus::Pending);
    }

    #[test]
    fn create_rejects_empty_lines() {
        let result = Order::new(
            CreateOrderCommand {
                placed_by: ActorId::new("user-1"),
                lines: vec![],
            },
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_zero_quantity_line() {
        let result = Order::new(
            CreateOrderCommand {
                placed_by: ActorId::new("user-1"),
                lines: vec![OrderLine {
                    sku_id: SkuId::new("sku-1"),
                    quantity: Quantity::ZERO,
                }],
            },
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn valid_transition_appends_history_and_event() {
        let mut o = order();
        o.transition_to(
            OrderStatus::Confirmed,
            ActorId::new("user-1"),
            Some("payment ok".to_string()),
            None,
            Timestamp::now(),
        )
        .unwrap();

        assert_eq!(o.status(), OrderStatus::Confirmed);
        assert_eq!(o.history().len(), 2);
        assert_eq!(o.history()[1].reason.as_deref(), Some("payment ok"));

        let events = o.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], OrderEvent::StatusChanged(_)));
    }

    #[test]
    fn invalid_transition_is_rejected_without_side_effects() {
        let mut o = order();
        let err = o
            .transition_to(
                OrderStatus::Delivered,
                ActorId::new("user-1"),
                None,
                None,
                Timestamp::now(),
            )
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        assert_eq!(o.status(), OrderStatus::Pending);
        assert_eq!(o.history().len(), 1);
        assert!(o.drain_events().is_empty());
    }

    #[test]
    fn cancel_pending_order() {
        let mut o = order();
        o.cancel(ActorId::new("user-1"), "changed my mind", Timestamp::now())
            .unwrap();

        assert_eq!(o.status(), OrderStatus::Cancelled);
        assert!(o.cancelled_at().is_some());
        assert_eq!(o.cancellation_reason(), Some("changed my mind"));

        let events = o.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], OrderEvent::Cancelled(_)));
    }

    #[test]
    fn cancel_shipped_order_bypasses_table() {
        let mut o = order();
        let actor = ActorId::new("ops");
        o.transition_to(OrderStatus::Confirmed, actor.clone(), None, None, Timestamp::now())
            .unwrap();
        o.transition_to(OrderStatus::Processing, actor.clone(), None, None, Timestamp::now())
            .unwrap();
        o.transition_to(OrderStatus::Shipped, actor.clone(), None, None, Timestamp::now())
            .unwrap();

        o.cancel(actor, "parcel recalled", Timestamp::now()).unwrap();
        assert_eq!(o.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn cancel_twice_fails() {
        let mut o = order();
        o.cancel(ActorId::new("user-1"), "first", Timestamp::now())
            .unwrap();

        let err = o
            .cancel(ActorId::new("user-1"), "second", Timestamp::now())
            .unwrap_err();
        assert!(matches!(err, OrderError::CannotCancel { .. }));
    }

    #[test]
    fn cancel_delivered_order_fails() {
        let mut o = order();
        let actor = ActorId::new("ops");
        o.transition_to(OrderStatus::Confirmed, actor.clone(), None, None, Timestamp::now())
            .unwrap();
        o.transition_to(OrderStatus::Processing, actor.clone(), None, None, Timestamp::now())
            .unwrap();
        o.transition_to(OrderStatus::Shipped, actor.clone(), None, None, Timestamp::now())
            .unwrap();
        o.transition_to(OrderStatus::Delivered, actor.clone(), None, None, Timestamp::now())
            .unwrap();

        assert!(o.cancel(actor, "too late", Timestamp::now()).is_err());
    }

    #[test]
    fn full_happy_path_history() {
        let mut o = order();
        let actor = ActorId::new("ops");
        for target in [
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Refunded,
        ] {
            o.transition_to(target, actor.clone(), None, None, Timestamp::now())
                .unwrap();
        }

        assert_eq!(o.status(), OrderStatus::Refunded);
        // Initial row plus five transitions.
        assert_eq!(o.history().len(), 6);
    }
}
