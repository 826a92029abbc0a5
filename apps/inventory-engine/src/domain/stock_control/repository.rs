//! Inventory Store Trait
//!
//! Defines the persistence abstraction for stock records, reservations,
//! and the movement ledger. Implemented by adapters in the infrastructure
//! layer.

use async_trait::async_trait;

use super::aggregate::{Reservation, StockRecord};
use super::errors::StockError;
use super::value_objects::StockMovement;
use crate::domain::shared::{LocationId, OrderId, Quantity, ReservationId, SkuId, StockId, Timestamp};

/// The writes of one stock operation, applied as a unit.
///
/// This is the scoped-transaction boundary of the engine: every mutating
/// operation stages its resulting rows here and hands the batch to the
/// store, which applies all of them or none. No partial write is ever
/// observable outside `InventoryStore::commit`.
#[derive(Debug, Clone, Default)]
pub struct CommitBatch {
    stock: Option<StockRecord>,
    reservation: Option<Reservation>,
    movement: Option<StockMovement>,
}

impl CommitBatch {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a stock record upsert.
    #[must_use]
    pub fn with_stock(mut self, stock: StockRecord) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Stage a reservation upsert.
    #[must_use]
    pub fn with_reservation(mut self, reservation: Reservation) -> Self {
        self.reservation = Some(reservation);
        self
    }

    /// Stage an appended movement row.
    #[must_use]
    pub fn with_movement(mut self, movement: StockMovement) -> Self {
        self.movement = Some(movement);
        self
    }

    /// The staged stock record, if any.
    #[must_use]
    pub const fn stock(&self) -> Option<&StockRecord> {
        self.stock.as_ref()
    }

    /// The staged reservation, if any.
    #[must_use]
    pub const fn reservation(&self) -> Option<&Reservation> {
        self.reservation.as_ref()
    }

    /// The staged movement, if any.
    #[must_use]
    pub const fn movement(&self) -> Option<&StockMovement> {
        self.movement.as_ref()
    }

    /// Tear the batch into its parts (for adapters applying it).
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Option<StockRecord>,
        Option<Reservation>,
        Option<StockMovement>,
    ) {
        (self.stock, self.reservation, self.movement)
    }

    /// True when nothing is staged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stock.is_none() && self.reservation.is_none() && self.movement.is_none()
    }
}

/// Repository trait for the three stock collections.
///
/// This is a domain interface (port) implemented by infrastructure
/// adapters (in-memory, SQL). Reads return records regardless of the
/// soft-delete flag unless documented otherwise; the engine decides what
/// an inactive record means for each operation.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Find the stock record for a (SKU, location) identity, active or not.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_stock(
        &self,
        sku_id: &SkuId,
        location_id: &LocationId,
    ) -> Result<Option<StockRecord>, StockError>;

    /// Find a stock record by its internal id, active or not.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_stock_by_id(&self, stock_id: &StockId)
        -> Result<Option<StockRecord>, StockError>;

    /// Find all active stock records for a SKU across locations.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_stock_by_sku(&self, sku_id: &SkuId) -> Result<Vec<StockRecord>, StockError>;

    /// Find active stock records at or below a threshold: the explicit one
    /// when given, each record's own reorder point otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_low_stock(
        &self,
        threshold: Option<Quantity>,
    ) -> Result<Vec<StockRecord>, StockError>;

    /// Find a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Option<Reservation>, StockError>;

    /// Find every reservation belonging to an order, any status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_reservations_for_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<Reservation>, StockError>;

    /// Find active reservations whose deadline has passed at `now`.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_due_reservations(&self, now: Timestamp) -> Result<Vec<Reservation>, StockError>;

    /// Movement rows for one stock record, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn movements_for_stock(
        &self,
        stock_id: &StockId,
    ) -> Result<Vec<StockMovement>, StockError>;

    /// Apply a batch atomically: every staged row or none.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails; on error no staged row may have
    /// been applied.
    async fn commit(&self, batch: CommitBatch) -> Result<(), StockError>;
}
