//! Order status in the fulfillment lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// Orders start Pending and end in Cancelled or Refunded; Refunded is
/// reachable only from Delivered in the modelled transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    Pending,
    /// Order confirmed, payment authorized.
    Confirmed,
    /// Order being picked and packed.
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order received by the customer.
    Delivered,
    /// Order cancelled before delivery.
    Cancelled,
    /// Order refunded after delivery.
    Refunded,
}

impl OrderStatus {
    /// All statuses, for exhaustive table checks.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Refunded)
    }

    /// Returns true if the order can still be cancelled.
    ///
    /// Cancellation is a privileged transition: it is allowed from any
    /// state that is neither terminal nor Delivered, including Shipped
    /// (a parcel can be recalled; a delivered one cannot).
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Confirmed | Self::Processing | Self::Shipped
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Refunded => write!(f, "REFUNDED"),
        }
    }
}
