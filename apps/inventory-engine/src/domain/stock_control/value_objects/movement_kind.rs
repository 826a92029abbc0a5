//! Movement kind classifying each ledger entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a stock movement.
///
/// `Initial`, `Reservation`, and `Release` are written by the engine
/// itself; the remaining kinds are accepted on direct adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    /// Opening balance written when the stock record is created.
    Initial,
    /// Restock from a purchase order.
    Purchase,
    /// Direct sale outside the reservation flow.
    Sale,
    /// Customer return put back on the shelf.
    Return,
    /// Manual count correction.
    Adjustment,
    /// Hold placed by a reservation.
    Reservation,
    /// Reversal of a reservation hold (cancel or expiry).
    Release,
    /// Stock written off as damaged.
    Damage,
    /// Transfer between locations.
    Transfer,
}

impl MovementKind {
    /// Returns true if this kind may be supplied to a direct adjustment.
    ///
    /// The reservation lifecycle kinds and the opening balance are
    /// engine-internal and rejected on the adjust path.
    #[must_use]
    pub const fn is_adjustable(&self) -> bool {
        matches!(
            self,
            Self::Purchase
                | Self::Sale
                | Self::Return
                | Self::Adjustment
                | Self::Damage
                | Self::Transfer
        )
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "INITIAL"),
            Self::Purchase => write!(f, "PURCHASE"),
            Self::Sale => write!(f, "SALE"),
            Self::Return => write!(f, "RETURN"),
            Self::Adjustment => write!(f, "ADJUSTMENT"),
            Self::Reservation => write!(f, "RESERVATION"),
            Self::Release => write!(f, "RELEASE"),
            Self::Damage => write!(f, "DAMAGE"),
            Self::Transfer => write!(f, "TRANSFER"),
        }
    }
}
