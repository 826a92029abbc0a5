//! Stock control errors.

use std::fmt;

use super::value_objects::ReservationStatus;
use crate::domain::shared::{LocationId, Quantity, ReservationId, SkuId};

/// Errors that can occur in stock control operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// No stock record exists for the requested identity.
    StockNotFound {
        /// SKU key.
        sku_id: SkuId,
        /// Location key.
        location_id: LocationId,
    },

    /// No stock record exists with the given internal id.
    StockIdNotFound {
        /// Stock record id.
        stock_id: String,
    },

    /// A stock record already exists for this (SKU, location) identity.
    DuplicateStock {
        /// SKU key.
        sku_id: SkuId,
        /// Location key.
        location_id: LocationId,
    },

    /// Reserve request exceeds the available quantity.
    InsufficientStock {
        /// SKU key.
        sku_id: SkuId,
        /// Location key.
        location_id: LocationId,
        /// Units requested.
        requested: Quantity,
        /// Units available at the moment the lock was held.
        available: Quantity,
    },

    /// Reservation not found.
    ReservationNotFound {
        /// Reservation id.
        reservation_id: ReservationId,
    },

    /// Operation requires an Active reservation.
    InvalidReservationState {
        /// Reservation id.
        reservation_id: ReservationId,
        /// Status the reservation was found in.
        status: ReservationStatus,
    },

    /// Invalid operation parameters, rejected before any lock is taken.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// The stock record lock could not be acquired within the bounded
    /// wait. Safe to retry the whole operation.
    LockContended {
        /// The contended lock key (`sku:location`).
        key: String,
    },
}

impl StockError {
    /// Returns true if retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::LockContended { .. })
    }
}

impl fmt::Display for StockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StockNotFound {
                sku_id,
                location_id,
            } => {
                write!(f, "Stock not found for SKU {sku_id} at {location_id}")
            }
            Self::StockIdNotFound { stock_id } => {
                write!(f, "Stock record not found: {stock_id}")
            }
            Self::DuplicateStock {
                sku_id,
                location_id,
            } => {
                write!(
                    f,
                    "Stock already exists for SKU {sku_id} at {location_id}"
                )
            }
            Self::InsufficientStock {
                sku_id,
                location_id,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient stock for SKU {sku_id} at {location_id}: requested {requested}, available {available}"
                )
            }
            Self::ReservationNotFound { reservation_id } => {
                write!(f, "Reservation not found: {reservation_id}")
            }
            Self::InvalidReservationState {
                reservation_id,
                status,
            } => {
                write!(
                    f,
                    "Reservation {reservation_id} is {status}, expected ACTIVE"
                )
            }
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid stock parameter '{field}': {message}")
            }
            Self::LockContended { key } => {
                write!(f, "Stock record {key} is contended, retry the operation")
            }
        }
    }
}

impl std::error::Error for StockError {}
