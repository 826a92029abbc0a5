//! Stock Record Aggregate Root
//!
//! One stock record tracks the quantity state of a single SKU at a single
//! location. Every quantity mutation flows through the methods here so the
//! conservation invariant `total = available + reserved` holds after each
//! one; the engine serializes callers per record before invoking them.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{LocationId, Quantity, SkuId, StockId, Timestamp};
use crate::domain::stock_control::errors::StockError;

/// Command to create a new stock record.
#[derive(Debug, Clone)]
pub struct CreateStockCommand {
    /// SKU key.
    pub sku_id: SkuId,
    /// Location key.
    pub location_id: LocationId,
    /// Opening available quantity.
    pub initial_quantity: Quantity,
    /// Reorder point; defaults to zero (never low).
    pub reorder_point: Option<Quantity>,
    /// Advisory capacity ceiling for the location.
    pub max_stock: Option<Quantity>,
}

impl CreateStockCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns error if any quantity is negative or identity keys are empty.
    pub fn validate(&self) -> Result<(), StockError> {
        if self.sku_id.as_str().trim().is_empty() {
            return Err(StockError::InvalidParameters {
                field: "sku_id".to_string(),
                message: "SKU key cannot be empty".to_string(),
            });
        }
        if self.location_id.as_str().trim().is_empty() {
            return Err(StockError::InvalidParameters {
                field: "location_id".to_string(),
                message: "location key cannot be empty".to_string(),
            });
        }
        self.initial_quantity
            .validate_non_negative("initial_quantity")
            .map_err(|e| StockError::InvalidParameters {
                field: "initial_quantity".to_string(),
                message: e.to_string(),
            })?;
        if let Some(reorder_point) = self.reorder_point {
            reorder_point
                .validate_non_negative("reorder_point")
                .map_err(|e| StockError::InvalidParameters {
                    field: "reorder_point".to_string(),
                    message: e.to_string(),
                })?;
        }
        if let Some(max_stock) = self.max_stock {
            max_stock
                .validate_non_negative("max_stock")
                .map_err(|e| StockError::InvalidParameters {
                    field: "max_stock".to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Stock Record Aggregate Root.
///
/// Quantity state of one SKU at one location. Never hard-deleted; soft
/// removal flips `is_active` and preserves the movement history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    id: StockId,
    sku_id: SkuId,
    location_id: LocationId,
    available: Quantity,
    reserved: Quantity,
    total: Quantity,
    reorder_point: Quantity,
    max_stock: Option<Quantity>,
    is_active: bool,
    last_movement_at: Timestamp,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl StockRecord {
    /// Create a new stock record from a command.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn new(cmd: CreateStockCommand, now: Timestamp) -> Result<Self, StockError> {
        cmd.validate()?;

        Ok(Self {
            id: StockId::generate(),
            sku_id: cmd.sku_id,
            location_id: cmd.location_id,
            available: cmd.initial_quantity,
            reserved: Quantity::ZERO,
            total: cmd.initial_quantity,
            reorder_point: cmd.reorder_point.unwrap_or(Quantity::ZERO),
            max_stock: cmd.max_stock,
            is_active: true,
            last_movement_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the stock record id.
    #[must_use]
    pub const fn id(&self) -> &StockId {
        &self.id
    }

    /// Get the SKU key.
    #[must_use]
    pub const fn sku_id(&self) -> &SkuId {
        &self.sku_id
    }

    /// Get the location key.
    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Units ready to sell.
    #[must_use]
    pub const fn available(&self) -> Quantity {
        self.available
    }

    /// Units held by active reservations.
    #[must_use]
    pub const fn reserved(&self) -> Quantity {
        self.reserved
    }

    /// Total on-hand units (available + reserved).
    #[must_use]
    pub const fn total(&self) -> Quantity {
        self.total
    }

    /// The reorder point for low-stock reporting.
    #[must_use]
    pub const fn reorder_point(&self) -> Quantity {
        self.reorder_point
    }

    /// Advisory capacity ceiling, if configured.
    #[must_use]
    pub const fn max_stock(&self) -> Option<Quantity> {
        self.max_stock
    }

    /// Whether the record is active (soft-delete flag).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// When the last quantity mutation was committed.
    #[must_use]
    pub const fn last_movement_at(&self) -> Timestamp {
        self.last_movement_at
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Whether available stock has fallen to the reorder point or below.
    #[must_use]
    pub fn is_below_reorder_point(&self) -> bool {
        self.available <= self.reorder_point
    }

    /// Move units from available into the reserved pool.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` if fewer than `quantity` units are
    /// available.
    pub fn reserve(&mut self, quantity: Quantity, now: Timestamp) -> Result<(), StockError> {
        if self.available < quantity {
            return Err(StockError::InsufficientStock {
                sku_id: self.sku_id.clone(),
                location_id: self.location_id.clone(),
                requested: quantity,
                available: self.available,
            });
        }
        self.available = self.available - quantity;
        self.reserved = self.reserved + quantity;
        self.touch(now);
        Ok(())
    }

    /// Move units from the reserved pool back into available.
    ///
    /// # Errors
    ///
    /// Returns error if `quantity` exceeds the reserved pool; the engine
    /// only releases quantities taken from active reservations, so this
    /// guards against a corrupted caller.
    pub fn release_reserved(
        &mut self,
        quantity: Quantity,
        now: Timestamp,
    ) -> Result<(), StockError> {
        if self.reserved < quantity {
            return Err(StockError::InvalidParameters {
                field: "quantity".to_string(),
                message: format!(
                    "cannot release {quantity} units, only {} reserved",
                    self.reserved
                ),
            });
        }
        self.reserved = self.reserved - quantity;
        self.available = self.available + quantity;
        self.touch(now);
        Ok(())
    }

    /// Remove units from the reserved pool without returning them to
    /// available (reservation fulfilled, goods shipped).
    ///
    /// # Errors
    ///
    /// Returns error if `quantity` exceeds the reserved pool.
    pub fn consume_reserved(
        &mut self,
        quantity: Quantity,
        now: Timestamp,
    ) -> Result<(), StockError> {
        if self.reserved < quantity {
            return Err(StockError::InvalidParameters {
                field: "quantity".to_string(),
                message: format!(
                    "cannot fulfill {quantity} units, only {} reserved",
                    self.reserved
                ),
            });
        }
        self.reserved = self.reserved - quantity;
        self.touch(now);
        Ok(())
    }

    /// Apply a signed adjustment to the available quantity, clamped at
    /// zero, and return the delta that was actually applied.
    ///
    /// The applied delta may be smaller in magnitude than the requested one
    /// when a negative adjustment would drive available below zero.
    pub fn apply_adjustment(&mut self, delta: Quantity, now: Timestamp) -> Quantity {
        let previous = self.available;
        self.available = self.available.saturating_add_clamped(delta);
        self.touch(now);
        self.available - previous
    }

    /// Soft-remove the record. History stays replayable; the identity stays
    /// occupied so the same (SKU, location) cannot be re-created.
    pub fn deactivate(&mut self, now: Timestamp) {
        self.is_active = false;
        self.updated_at = now;
    }

    fn touch(&mut self, now: Timestamp) {
        self.total = self.available + self.reserved;
        self.last_movement_at = now;
        self.updated_at = now;
        debug_assert!(!self.available.is_negative());
        debug_assert!(!self.reserved.is_negative());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(initial: i64) -> StockRecord {
        StockRecord::new(
            CreateStockCommand {
                sku_id: SkuId::new("sku-1"),
                location_id: LocationId::new("w1"),
                initial_quantity: Quantity::new(initial),
                reorder_point: Some(Quantity::new(5)),
                max_stock: None,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_record_has_no_reserved_units() {
        let r = record(10);
        assert_eq!(r.available(), Quantity::new(10));
        assert_eq!(r.reserved(), Quantity::ZERO);
        assert_eq!(r.total(), Quantity::new(10));
        assert!(r.is_active());
    }

    #[test]
    fn create_rejects_negative_initial_quantity() {
        let result = StockRecord::new(
            CreateStockCommand {
                sku_id: SkuId::new("sku-1"),
                location_id: LocationId::new("w1"),
                initial_quantity: Quantity::new(-1),
                reorder_point: None,
                max_stock: None,
            },
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_empty_identity_keys() {
        let result = StockRecord::new(
            CreateStockCommand {
                sku_id: SkuId::new("  "),
                location_id: LocationId::new("w1"),
                initial_quantity: Quantity::new(1),
                reorder_point: None,
                max_stock: None,
            },
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn reserve_moves_units_between_pools() {
        let mut r = record(10);
        r.reserve(Quantity::new(6), Timestamp::now()).unwrap();

        assert_eq!(r.available(), Quantity::new(4));
        assert_eq!(r.reserved(), Quantity::new(6));
        assert_eq!(r.total(), Quantity::new(10));
    }

    #[test]
    fn reserve_fails_when_insufficient() {
        let mut r = record(10);
        r.reserve(Quantity::new(6), Timestamp::now()).unwrap();

        let err = r.reserve(Quantity::new(5), Timestamp::now()).unwrap_err();
        assert!(matches!(err, StockError::InsufficientStock { .. }));
        // State unchanged on failure.
        assert_eq!(r.available(), Quantity::new(4));
        assert_eq!(r.reserved(), Quantity::new(6));
    }

    #[test]
    fn reserve_exact_available_succeeds() {
        let mut r = record(10);
        r.reserve(Quantity::new(10), Timestamp::now()).unwrap();
        assert_eq!(r.available(), Quantity::ZERO);
        assert_eq!(r.total(), Quantity::new(10));
    }

    #[test]
    fn release_reverses_a_reservation() {
        let mut r = record(10);
        r.reserve(Quantity::new(6), Timestamp::now()).unwrap();
        r.release_reserved(Quantity::new(6), Timestamp::now()).unwrap();

        assert_eq!(r.available(), Quantity::new(10));
        assert_eq!(r.reserved(), Quantity::ZERO);
    }

    #[test]
    fn release_more_than_reserved_fails() {
        let mut r = record(10);
        r.reserve(Quantity::new(2), Timestamp::now()).unwrap();

        assert!(r.release_reserved(Quantity::new(3), Timestamp::now()).is_err());
    }

    #[test]
    fn consume_reserved_shrinks_total() {
        let mut r = record(10);
        r.reserve(Quantity::new(6), Timestamp::now()).unwrap();
        r.consume_reserved(Quantity::new(6), Timestamp::now()).unwrap();

        assert_eq!(r.available(), Quantity::new(4));
        assert_eq!(r.reserved(), Quantity::ZERO);
        assert_eq!(r.total(), Quantity::new(4));
    }

    #[test]
    fn adjustment_is_clamped_at_zero() {
        let mut r = record(10);
        let applied = r.apply_adjustment(Quantity::new(-20), Timestamp::now());

        assert_eq!(applied, Quantity::new(-10));
        assert_eq!(r.available(), Quantity::ZERO);
        assert_eq!(r.total(), Quantity::ZERO);
    }

    #[test]
    fn positive_adjustment_applies_in_full() {
        let mut r = record(10);
        let applied = r.apply_adjustment(Quantity::new(15), Timestamp::now());

        assert_eq!(applied, Quantity::new(15));
        assert_eq!(r.available(), Quantity::new(25));
    }

    #[test]
    fn adjustment_does_not_touch_reserved() {
        let mut r = record(10);
        r.reserve(Quantity::new(4), Timestamp::now()).unwrap();
        r.apply_adjustment(Quantity::new(-20), Timestamp::now());

        assert_eq!(r.available(), Quantity::ZERO);
        assert_eq!(r.reserved(), Quantity::new(4));
        assert_eq!(r.total(), Quantity::new(4));
    }

    #[test]
    fn below_reorder_point() {
        let mut r = record(10);
        assert!(!r.is_below_reorder_point());

        r.reserve(Quantity::new(6), Timestamp::now()).unwrap();
        assert!(r.is_below_reorder_point()); // available 4 <= reorder 5
    }

    #[test]
    fn deactivate_is_soft() {
        let mut r = record(10);
        r.deactivate(Timestamp::now());

        assert!(!r.is_active());
        assert_eq!(r.total(), Quantity::new(10)); // quantities untouched
    }

    #[test]
    fn conservation_holds_across_mixed_operations() {
        let mut r = record(50);
        let now = Timestamp::now();

        r.reserve(Quantity::new(20), now).unwrap();
        r.apply_adjustment(Quantity::new(-10), now);
        r.release_reserved(Quantity::new(5), now).unwrap();
        r.consume_reserved(Quantity::new(15), now).unwrap();
        r.apply_adjustment(Quantity::new(7), now);

        assert_eq!(r.total(), r.available() + r.reserved());
    }
}
