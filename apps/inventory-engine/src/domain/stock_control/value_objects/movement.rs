//! Stock movement: one immutable row of the quantity ledger.

use serde::{Deserialize, Serialize};

use super::MovementKind;
use crate::domain::shared::{ActorId, MovementId, OrderId, Quantity, ReservationId, StockId, Timestamp};

/// An immutable audit record of one change to a stock record's available
/// quantity.
///
/// Invariant, guaranteed by construction: `new_quantity = previous_quantity
/// + quantity`, where both snapshots are of the record's available quantity
/// around the mutation. Replaying a record's movements in commit order from
/// zero reproduces its current available quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Movement id.
    pub id: MovementId,
    /// The stock record this movement belongs to.
    pub stock_id: StockId,
    /// Classification of the change.
    pub kind: MovementKind,
    /// Signed delta applied to the available quantity.
    pub quantity: Quantity,
    /// Available quantity before the mutation.
    pub previous_quantity: Quantity,
    /// Available quantity after the mutation.
    pub new_quantity: Quantity,
    /// Order that triggered the change, if any.
    pub order_id: Option<OrderId>,
    /// Reservation that triggered the change, if any.
    pub reservation_id: Option<ReservationId>,
    /// Actor that performed the operation.
    pub performed_by: ActorId,
    /// Short machine-friendly reason.
    pub reason: Option<String>,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// When the mutation was committed.
    pub occurred_at: Timestamp,
}

impl StockMovement {
    /// Record a movement from before/after snapshots of the available
    /// quantity. The signed delta is derived, never supplied, so the
    /// ledger-replay invariant cannot be violated.
    #[must_use]
    pub fn record(
        stock_id: StockId,
        kind: MovementKind,
        previous_quantity: Quantity,
        new_quantity: Quantity,
        performed_by: ActorId,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            id: MovementId::generate(),
            stock_id,
            kind,
            quantity: new_quantity - previous_quantity,
            previous_quantity,
            new_quantity,
            order_id: None,
            reservation_id: None,
            performed_by,
            reason: None,
            notes: None,
            occurred_at,
        }
    }

    /// Attach the order that triggered this movement.
    #[must_use]
    pub fn for_order(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Attach the reservation that triggered this movement.
    #[must_use]
    pub fn for_reservation(mut self, reservation_id: ReservationId) -> Self {
        self.reservation_id = Some(reservation_id);
        self
    }

    /// Attach a short reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
