//! Reservation entity: a time-bounded hold against a stock record.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{
    ActorId, LocationId, OrderId, Quantity, ReservationId, SkuId, StockId, Timestamp,
};
use crate::domain::stock_control::errors::StockError;
use crate::domain::stock_control::value_objects::ReservationStatus;

/// A hold of `quantity` units of one stock record for one order.
///
/// The deadline in `expires_at` is advisory until acted upon: nothing
/// fires automatically, the sweep (or a lazy check) transitions the hold
/// to Expired and restores the quantity. Terminal states are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    stock_id: StockId,
    sku_id: SkuId,
    location_id: LocationId,
    order_id: OrderId,
    quantity: Quantity,
    status: ReservationStatus,
    reserved_by: ActorId,
    expires_at: Timestamp,
    fulfilled_at: Option<Timestamp>,
    cancelled_at: Option<Timestamp>,
    reason: Option<String>,
    created_at: Timestamp,
}

impl Reservation {
    /// Create a new active reservation.
    #[must_use]
    pub fn new(
        stock_id: StockId,
        sku_id: SkuId,
        location_id: LocationId,
        order_id: OrderId,
        quantity: Quantity,
        reserved_by: ActorId,
        expires_at: Timestamp,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ReservationId::generate(),
            stock_id,
            sku_id,
            location_id,
            order_id,
            quantity,
            status: ReservationStatus::Active,
            reserved_by,
            expires_at,
            fulfilled_at: None,
            cancelled_at: None,
            reason: None,
            created_at: now,
        }
    }

    /// Get the reservation id.
    #[must_use]
    pub const fn id(&self) -> &ReservationId {
        &self.id
    }

    /// The stock record this hold counts against.
    #[must_use]
    pub const fn stock_id(&self) -> &StockId {
        &self.stock_id
    }

    /// SKU key of the held stock.
    #[must_use]
    pub const fn sku_id(&self) -> &SkuId {
        &self.sku_id
    }

    /// Location key of the held stock.
    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// The order this hold belongs to.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Held units.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Actor that requested the hold.
    #[must_use]
    pub const fn reserved_by(&self) -> &ActorId {
        &self.reserved_by
    }

    /// Hold deadline.
    #[must_use]
    pub const fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// When the hold was fulfilled, if it was.
    #[must_use]
    pub const fn fulfilled_at(&self) -> Option<Timestamp> {
        self.fulfilled_at
    }

    /// When the hold was cancelled, if it was.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<Timestamp> {
        self.cancelled_at
    }

    /// Reason attached on release, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Whether the deadline has passed at `now`. Meaningful only while
    /// the status is still Active.
    #[must_use]
    pub fn is_past_deadline(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Cancel the hold (explicit release).
    ///
    /// # Errors
    ///
    /// Returns `InvalidReservationState` if the hold is not Active; a
    /// second release of the same reservation fails here rather than
    /// double-crediting stock.
    pub fn cancel(&mut self, now: Timestamp, reason: Option<String>) -> Result<(), StockError> {
        self.ensure_active()?;
        self.status = ReservationStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.reason = reason;
        Ok(())
    }

    /// Expire the hold (deadline passed without fulfillment).
    ///
    /// # Errors
    ///
    /// Returns `InvalidReservationState` if the hold is not Active.
    pub fn expire(&mut self, now: Timestamp) -> Result<(), StockError> {
        self.ensure_active()?;
        self.status = ReservationStatus::Expired;
        self.cancelled_at = Some(now);
        Ok(())
    }

    /// Fulfill the hold (order shipped, goods left the building).
    ///
    /// # Errors
    ///
    /// Returns `InvalidReservationState` if the hold is not Active.
    pub fn fulfill(&mut self, now: Timestamp) -> Result<(), StockError> {
        self.ensure_active()?;
        self.status = ReservationStatus::Fulfilled;
        self.fulfilled_at = Some(now);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), StockError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(StockError::InvalidReservationState {
                reservation_id: self.id.clone(),
                status: self.status,
            })
        }
    }
}
