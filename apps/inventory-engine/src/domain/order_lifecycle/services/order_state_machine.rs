//! Order State Machine Service
//!
//! Validates order status transitions against the modelled table.

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::value_objects::OrderStatus;

/// Order state machine for validating transitions.
///
/// The table is closed: exactly the pairs listed here are allowed, every
/// other pair is rejected. Refunded is reachable only from Delivered.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a status transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            // From Pending
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                // From Confirmed
                | (OrderStatus::Confirmed, OrderStatus::Processing)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
                // From Processing
                | (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                // From Shipped
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                // From Delivered
                | (OrderStatus::Delivered, OrderStatus::Refunded)
        )
    }

    /// Validate a status transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition {
                from,
                to,
                reason: Self::transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: OrderStatus, to: OrderStatus) -> String {
        match from {
            OrderStatus::Cancelled => {
                format!("Order is cancelled, cannot transition to {to}")
            }
            OrderStatus::Refunded => {
                format!("Order is refunded, cannot transition to {to}")
            }
            OrderStatus::Delivered => {
                format!("Delivered orders can only be refunded, not {to}")
            }
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        match from {
            OrderStatus::Pending => vec![OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => vec![OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => vec![OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => vec![OrderStatus::Delivered],
            OrderStatus::Delivered => vec![OrderStatus::Refunded],
            // Terminal states
            OrderStatus::Cancelled | OrderStatus::Refunded => vec![],
        }
    }
}
