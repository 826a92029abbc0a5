//! Order lifecycle errors.

use std::fmt;

use super::value_objects::OrderStatus;
use crate::domain::shared::OrderId;
use crate::domain::stock_control::StockError;

/// Errors that can occur in the order lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Invalid status transition attempted.
    InvalidTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Order cannot be cancelled in its current state.
    CannotCancel {
        /// Order id.
        order_id: OrderId,
        /// Current status.
        status: OrderStatus,
    },

    /// Order not found.
    NotFound {
        /// Order id.
        order_id: OrderId,
    },

    /// Invalid order parameters.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// A stock operation performed on the order's behalf failed.
    Stock(StockError),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to, reason } => {
                write!(f, "Invalid order status transition: {from} -> {to}: {reason}")
            }
            Self::CannotCancel { order_id, status } => {
                write!(f, "Cannot cancel order {order_id} in status {status}")
            }
            Self::NotFound { order_id } => {
                write!(f, "Order not found: {order_id}")
            }
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::Stock(e) => {
                write!(f, "Stock operation failed: {e}")
            }
        }
    }
}

impl std::error::Error for OrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stock(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StockError> for OrderError {
    fn from(e: StockError) -> Self {
        Self::Stock(e)
    }
}
