//! Immutable status-history record appended on every order transition.

use serde::{Deserialize, Serialize};

use super::OrderStatus;
use crate::domain::shared::{ActorId, OrderId, Timestamp};

/// One row of an order's status history.
///
/// Append-only; rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The order the change belongs to.
    pub order_id: OrderId,
    /// Status before the change.
    pub from_status: OrderStatus,
    /// Status after the change.
    pub to_status: OrderStatus,
    /// Actor that requested the change.
    pub changed_by: ActorId,
    /// When the change was committed.
    pub changed_at: Timestamp,
    /// Short reason.
    pub reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl StatusChange {
    /// Record a status change.
    #[must_use]
    pub fn record(
        order_id: OrderId,
        from_status: OrderStatus,
        to_status: OrderStatus,
        changed_by: ActorId,
        changed_at: Timestamp,
    ) -> Self {
        Self {
            order_id,
            from_status,
            to_status,
            changed_by,
            changed_at,
            reason: None,
            notes: None,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_builders() {
        let change = StatusChange::record(
            OrderId::new("ord-1"),
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            ActorId::new("user-1"),
            Timestamp::now(),
        )
        .with_reason("payment authorized")
        .with_notes("card ending 4242");

        assert_eq!(change.from_status, OrderStatus::Pending);
        assert_eq!(change.to_status, OrderStatus::Confirmed);
        assert_eq!(change.reason.as_deref(), Some("payment authorized"));
        assert_eq!(change.notes.as_deref(), Some("card ending 4242"));
    }

    #[test]
    fn status_change_serde_roundtrip() {
        let change = StatusChange::record(
            OrderId::new("ord-1"),
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            ActorId::new("carrier"),
            Timestamp::now(),
        );
        let json = serde_json::to_string(&change).unwrap();
        let parsed: StatusChange = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, change);
    }
}
