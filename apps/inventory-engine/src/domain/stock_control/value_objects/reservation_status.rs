//! Reservation status in the hold lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a stock reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// The hold is live and counted in the record's reserved quantity.
    Active,
    /// The order shipped; the held units left the building.
    Fulfilled,
    /// Explicitly released; the held units went back to available.
    Cancelled,
    /// The deadline passed without fulfillment; units went back to available.
    Expired,
}

impl ReservationStatus {
    /// Returns true if the reservation is in a terminal state.
    ///
    /// Terminal reservations are immutable.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Cancelled | Self::Expired)
    }

    /// Returns true if the hold still counts against reserved quantity.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Fulfilled => write!(f, "FULFILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_is_non_terminal() {
        assert!(!ReservationStatus::Active.is_terminal());
        assert!(ReservationStatus::Fulfilled.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(ReservationStatus::Expired.is_terminal());
    }

    #[test]
    fn is_active() {
        assert!(ReservationStatus::Active.is_active());
        assert!(!ReservationStatus::Expired.is_active());
    }

    #[test]
    fn reservation_status_display() {
        assert_eq!(format!("{}", ReservationStatus::Active), "ACTIVE");
        assert_eq!(format!("{}", ReservationStatus::Expired), "EXPIRED");
    }

    #[test]
    fn reservation_status_serde() {
        let json = serde_json::to_string(&ReservationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");

        let parsed: ReservationStatus = serde_json::from_str("\"FULFILLED\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Fulfilled);
    }
}
