//! In-memory inventory store and order repository.
//!
//! Reference storage engine for testing and development. Commit batches
//! are applied under one write lock, so the all-or-nothing guarantee of
//! the store port holds trivially; commit order of movements is their
//! insertion order.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::order_lifecycle::aggregate::Order;
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::repository::OrderRepository;
use crate::domain::order_lifecycle::value_objects::OrderStatus;
use crate::domain::shared::{
    LocationId, OrderId, Quantity, ReservationId, SkuId, StockId, Timestamp,
};
use crate::domain::stock_control::aggregate::{Reservation, StockRecord};
use crate::domain::stock_control::errors::StockError;
use crate::domain::stock_control::repository::{CommitBatch, InventoryStore};
use crate::domain::stock_control::value_objects::StockMovement;

#[derive(Debug, Default)]
struct InventoryState {
    stocks: HashMap<String, StockRecord>,
    identity_index: HashMap<(String, String), String>,
    reservations: HashMap<String, Reservation>,
    movements: HashMap<String, Vec<StockMovement>>,
}

/// In-memory implementation of `InventoryStore`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    state: RwLock<InventoryState>,
}

impl InMemoryInventoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stock records in the store.
    #[must_use]
    pub fn stock_count(&self) -> usize {
        self.read().stocks.len()
    }

    /// Number of movement rows for one stock record.
    #[must_use]
    pub fn movement_count(&self, stock_id: &StockId) -> usize {
        self.read()
            .movements
            .get(stock_id.as_str())
            .map_or(0, Vec::len)
    }

    /// Insert a reservation directly (for test setup, e.g. holds with a
    /// deadline already in the past).
    pub fn add_reservation(&self, reservation: Reservation) {
        let mut state = self.write();
        state
            .reservations
            .insert(reservation.id().as_str().to_string(), reservation);
    }

    /// Clear everything.
    pub fn clear(&self) {
        let mut state = self.write();
        state.stocks.clear();
        state.identity_index.clear();
        state.reservations.clear();
        state.movements.clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InventoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InventoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn find_stock(
        &self,
        sku_id: &SkuId,
        location_id: &LocationId,
    ) -> Result<Option<StockRecord>, StockError> {
        let state = self.read();
        let key = (sku_id.as_str().to_string(), location_id.as_str().to_string());
        Ok(state
            .identity_index
            .get(&key)
            .and_then(|id| state.stocks.get(id))
            .cloned())
    }

    async fn find_stock_by_id(
        &self,
        stock_id: &StockId,
    ) -> Result<Option<StockRecord>, StockError> {
        Ok(self.read().stocks.get(stock_id.as_str()).cloned())
    }

    async fn find_stock_by_sku(&self, sku_id: &SkuId) -> Result<Vec<StockRecord>, StockError> {
        Ok(self
            .read()
            .stocks
            .values()
            .filter(|s| s.sku_id() == sku_id && s.is_active())
            .cloned()
            .collect())
    }

    async fn find_low_stock(
        &self,
        threshold: Option<Quantity>,
    ) -> Result<Vec<StockRecord>, StockError> {
        Ok(self
            .read()
            .stocks
            .values()
            .filter(|s| s.is_active())
            .filter(|s| match threshold {
                Some(t) => s.available() <= t,
                None => s.is_below_reorder_point(),
            })
            .cloned()
            .collect())
    }

    async fn find_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Option<Reservation>, StockError> {
        Ok(self
            .read()
            .reservations
            .get(reservation_id.as_str())
            .cloned())
    }

    async fn find_reservations_for_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<Reservation>, StockError> {
        Ok(self
            .read()
            .reservations
            .values()
            .filter(|r| r.order_id() == order_id)
            .cloned()
            .collect())
    }

    async fn find_due_reservations(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Reservation>, StockError> {
        Ok(self
            .read()
            .reservations
            .values()
            .filter(|r| r.status().is_active() && r.is_past_deadline(now))
            .cloned()
            .collect())
    }

    async fn movements_for_stock(
        &self,
        stock_id: &StockId,
    ) -> Result<Vec<StockMovement>, StockError> {
        Ok(self
            .read()
            .movements
            .get(stock_id.as_str())
            .map(|rows| rows.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn commit(&self, batch: CommitBatch) -> Result<(), StockError> {
        let (stock, reservation, movement) = batch.into_parts();
        let mut state = self.write();

        if let Some(stock) = stock {
            let key = (
                stock.sku_id().as_str().to_string(),
                stock.location_id().as_str().to_string(),
            );
            state
                .identity_index
                .insert(key, stock.id().as_str().to_string());
            state
                .stocks
                .insert(stock.id().as_str().to_string(), stock);
        }
        if let Some(reservation) = reservation {
            state
                .reservations
                .insert(reservation.id().as_str().to_string(), reservation);
        }
        if let Some(movement) = movement {
            state
                .movements
                .entry(movement.stock_id.as_str().to_string())
                .or_default()
                .push(movement);
        }
        Ok(())
    }
}

/// In-memory implementation of `OrderRepository`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of orders in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an order to the repository (for test setup).
    pub fn add(&self, order: Order) {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.insert(order.id().as_str().to_string(), order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        orders.insert(order.id().as_str().to_string(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.get(id.as_str()).cloned())
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders
            .values()
            .filter(|o| o.status() == status)
            .cloned()
            .collect())
    }
}
