//! Domain events for the order lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::value_objects::OrderStatus;
use crate::domain::shared::{ActorId, OrderId, Timestamp};

/// All possible order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Order status changed through the transition table.
    StatusChanged(OrderStatusChanged),
    /// Order cancelled (privileged transition).
    Cancelled(OrderCancelled),
}

impl OrderEvent {
    /// Get the order id for this event.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::StatusChanged(e) => &e.order_id,
            Self::Cancelled(e) => &e.order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::StatusChanged(e) => e.occurred_at,
            Self::Cancelled(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::StatusChanged(_) => "ORDER_STATUS_CHANGED",
            Self::Cancelled(_) => "ORDER_CANCELLED",
        }
    }
}

/// Event: order status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    /// Order id.
    pub order_id: OrderId,
    /// Status before the change.
    pub from_status: OrderStatus,
    /// Status after the change.
    pub to_status: OrderStatus,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    /// Order id.
    pub order_id: OrderId,
    /// Status the order was in before cancellation.
    pub from_status: OrderStatus,
    /// Actor that cancelled the order.
    pub cancelled_by: ActorId,
    /// Reason for cancellation.
    pub reason: String,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
