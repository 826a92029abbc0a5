//! Domain events for stock control.
//!
//! Events capture committed quantity changes and enable event-driven
//! collaborators (order workflow, alerting) without coupling them to the
//! engine's storage.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{
    LocationId, OrderId, Quantity, ReservationId, SkuId, StockId, Timestamp,
};
use crate::domain::stock_control::value_objects::MovementKind;

/// All possible stock events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockEvent {
    /// Stock record created with its opening balance.
    StockCreated(StockCreated),
    /// Units moved into a reservation hold.
    StockReserved(StockReserved),
    /// A hold was reversed (explicit release or expiry).
    StockReleased(StockReleased),
    /// A hold was fulfilled; goods left the building.
    ReservationFulfilled(ReservationFulfilled),
    /// Available quantity adjusted directly.
    StockAdjusted(StockAdjusted),
    /// Available quantity fell to the reorder point or below.
    LowStock(LowStock),
}

impl StockEvent {
    /// Get the stock record id for this event.
    #[must_use]
    pub const fn stock_id(&self) -> &StockId {
        match self {
            Self::StockCreated(e) => &e.stock_id,
            Self::StockReserved(e) => &e.stock_id,
            Self::StockReleased(e) => &e.stock_id,
            Self::ReservationFulfilled(e) => &e.stock_id,
            Self::StockAdjusted(e) => &e.stock_id,
            Self::LowStock(e) => &e.stock_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::StockCreated(e) => e.occurred_at,
            Self::StockReserved(e) => e.occurred_at,
            Self::StockReleased(e) => e.occurred_at,
            Self::ReservationFulfilled(e) => e.occurred_at,
            Self::StockAdjusted(e) => e.occurred_at,
            Self::LowStock(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::StockCreated(_) => "STOCK_CREATED",
            Self::StockReserved(_) => "STOCK_RESERVED",
            Self::StockReleased(_) => "STOCK_RELEASED",
            Self::ReservationFulfilled(_) => "RESERVATION_FULFILLED",
            Self::StockAdjusted(_) => "STOCK_ADJUSTED",
            Self::LowStock(_) => "STOCK_LOW",
        }
    }
}

/// Event: stock record created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCreated {
    /// Stock record id.
    pub stock_id: StockId,
    /// SKU key.
    pub sku_id: SkuId,
    /// Location key.
    pub location_id: LocationId,
    /// Opening available quantity.
    pub quantity: Quantity,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: units reserved for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReserved {
    /// Reservation id.
    pub reservation_id: ReservationId,
    /// Stock record id.
    pub stock_id: StockId,
    /// Order holding the units.
    pub order_id: OrderId,
    /// Held units.
    pub quantity: Quantity,
    /// Hold deadline.
    pub expires_at: Timestamp,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: a hold was reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReleased {
    /// Reservation id.
    pub reservation_id: ReservationId,
    /// Stock record id.
    pub stock_id: StockId,
    /// Order that held the units.
    pub order_id: OrderId,
    /// Units returned to available.
    pub quantity: Quantity,
    /// True when the reversal came from expiry rather than an explicit
    /// release.
    pub expired: bool,
    /// Reason attached to the release, if any.
    pub reason: Option<String>,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: a hold was fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationFulfilled {
    /// Reservation id.
    pub reservation_id: ReservationId,
    /// Stock record id.
    pub stock_id: StockId,
    /// Order the goods shipped for.
    pub order_id: OrderId,
    /// Units consumed from the reserved pool.
    pub quantity: Quantity,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: available quantity adjusted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    /// Stock record id.
    pub stock_id: StockId,
    /// Adjustment classification.
    pub kind: MovementKind,
    /// Delta the caller asked for.
    pub requested: Quantity,
    /// Delta actually applied after clamping at zero.
    pub applied: Quantity,
    /// Available quantity before the adjustment.
    pub previous_quantity: Quantity,
    /// Available quantity after the adjustment.
    pub new_quantity: Quantity,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: available stock at or below the reorder point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStock {
    /// Stock record id.
    pub stock_id: StockId,
    /// SKU key.
    pub sku_id: SkuId,
    /// Location key.
    pub location_id: LocationId,
    /// Current available quantity.
    pub available: Quantity,
    /// The record's reorder point.
    pub reorder_point: Quantity,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
