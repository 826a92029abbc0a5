//! Stock Engine Service
//!
//! The single path through which stock quantities change. Every mutating
//! operation takes the record's keyed lock, stages its writes, and applies
//! them as one atomic commit batch, which is what makes oversell and
//! double-release impossible under concurrent callers.

use std::sync::Arc;

use crate::application::ports::EventPublisherPort;
use crate::concurrency::{KeyedLockManager, LockError};
use crate::config::EngineConfig;
use crate::domain::shared::{
    ActorId, LocationId, OrderId, Quantity, ReservationId, SkuId, StockId, Timestamp,
};
use crate::domain::stock_control::aggregate::{CreateStockCommand, Reservation, StockRecord};
use crate::domain::stock_control::errors::StockError;
use crate::domain::stock_control::events::{
    LowStock, ReservationFulfilled, StockAdjusted, StockCreated, StockEvent, StockReleased,
    StockReserved,
};
use crate::domain::stock_control::repository::{CommitBatch, InventoryStore};
use crate::domain::stock_control::value_objects::{MovementKind, StockMovement};

/// Actor recorded on movements the engine writes on its own behalf.
const SYSTEM_ACTOR: &str = "system";

/// Command to reserve stock for an order.
#[derive(Debug, Clone)]
pub struct ReserveStockCommand {
    /// SKU key.
    pub sku_id: SkuId,
    /// Location key.
    pub location_id: LocationId,
    /// Order the hold belongs to.
    pub order_id: OrderId,
    /// Units to hold.
    pub quantity: Quantity,
    /// Actor requesting the hold.
    pub reserved_by: ActorId,
    /// Minutes until the hold expires; engine default when omitted.
    pub expiration_minutes: Option<u32>,
}

impl ReserveStockCommand {
    fn validate(&self) -> Result<(), StockError> {
        self.quantity
            .validate_positive("quantity")
            .map_err(|e| StockError::InvalidParameters {
                field: "quantity".to_string(),
                message: e.to_string(),
            })?;
        if self.expiration_minutes == Some(0) {
            return Err(StockError::InvalidParameters {
                field: "expiration_minutes".to_string(),
                message: "expiration must be at least one minute".to_string(),
            });
        }
        Ok(())
    }
}

/// Command to adjust the available quantity of a stock record directly.
#[derive(Debug, Clone)]
pub struct AdjustStockCommand {
    /// SKU key.
    pub sku_id: SkuId,
    /// Location key.
    pub location_id: LocationId,
    /// Signed delta; negative deltas are clamped so available never goes
    /// below zero.
    pub quantity: Quantity,
    /// Movement classification; must be one of the adjustable kinds.
    pub kind: MovementKind,
    /// Actor performing the adjustment.
    pub performed_by: ActorId,
    /// Short reason.
    pub reason: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl AdjustStockCommand {
    fn validate(&self) -> Result<(), StockError> {
        if self.quantity.is_zero() {
            return Err(StockError::InvalidParameters {
                field: "quantity".to_string(),
                message: "adjustment delta cannot be zero".to_string(),
            });
        }
        if !self.kind.is_adjustable() {
            return Err(StockError::InvalidParameters {
                field: "kind".to_string(),
                message: format!("{} movements are written by the engine only", self.kind),
            });
        }
        Ok(())
    }
}

/// The stock engine: create, reserve, release, adjust, expire, and the
/// read queries over the three stock collections.
pub struct StockEngine<S, E>
where
    S: InventoryStore,
    E: EventPublisherPort,
{
    store: Arc<S>,
    publisher: Arc<E>,
    locks: KeyedLockManager,
    config: EngineConfig,
}

impl<S, E> StockEngine<S, E>
where
    S: InventoryStore,
    E: EventPublisherPort,
{
    /// Create a new engine over a store and an event publisher.
    #[must_use]
    pub fn new(store: Arc<S>, publisher: Arc<E>, config: EngineConfig) -> Self {
        let locks = KeyedLockManager::new(config.locking.max_wait());
        Self {
            store,
            publisher,
            locks,
            config,
        }
    }

    /// The lock key of one stock identity.
    fn stock_key(sku_id: &SkuId, location_id: &LocationId) -> String {
        format!("{sku_id}:{location_id}")
    }

    fn lock_error(e: LockError) -> StockError {
        let LockError::Timeout { key } = e;
        StockError::LockContended { key }
    }

    async fn publish(&self, events: Vec<StockEvent>) {
        if let Err(e) = self.publisher.publish_stock_events(events).await {
            tracing::error!("Failed to publish stock events: {}", e);
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create the stock record for a (SKU, location) identity.
    ///
    /// Writes the record and its opening `Initial` movement as one unit.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStock` if the identity already exists (active or
    /// deactivated); one record per identity, creation is not additive.
    pub async fn create_stock(&self, cmd: CreateStockCommand) -> Result<StockRecord, StockError> {
        cmd.validate()?;

        let key = Self::stock_key(&cmd.sku_id, &cmd.location_id);
        let _guard = self.locks.acquire(&key).await.map_err(Self::lock_error)?;

        if let Some(existing) = self.store.find_stock(&cmd.sku_id, &cmd.location_id).await? {
            return Err(StockError::DuplicateStock {
                sku_id: existing.sku_id().clone(),
                location_id: existing.location_id().clone(),
            });
        }

        let now = Timestamp::now();
        let record = StockRecord::new(cmd, now)?;
        let movement = StockMovement::record(
            record.id().clone(),
            MovementKind::Initial,
            Quantity::ZERO,
            record.available(),
            ActorId::new(SYSTEM_ACTOR),
            now,
        )
        .with_reason("Opening balance");

        self.store
            .commit(
                CommitBatch::new()
                    .with_stock(record.clone())
                    .with_movement(movement),
            )
            .await?;

        tracing::info!(
            stock_id = %record.id(),
            sku_id = %record.sku_id(),
            location_id = %record.location_id(),
            quantity = %record.available(),
            "stock record created"
        );
        self.publish(vec![StockEvent::StockCreated(StockCreated {
            stock_id: record.id().clone(),
            sku_id: record.sku_id().clone(),
            location_id: record.location_id().clone(),
            quantity: record.available(),
            occurred_at: now,
        })])
        .await;

        Ok(record)
    }

    /// Reserve units of a stock record for an order.
    ///
    /// Atomically moves units from available to reserved, creates the
    /// Active reservation, and appends the `Reservation` movement.
    ///
    /// # Errors
    ///
    /// Returns `StockNotFound` for an unknown or deactivated identity and
    /// `InsufficientStock` when fewer units are available than requested;
    /// on failure nothing is written.
    pub async fn reserve(&self, cmd: ReserveStockCommand) -> Result<Reservation, StockError> {
        cmd.validate()?;

        let key = Self::stock_key(&cmd.sku_id, &cmd.location_id);
        let _guard = self.locks.acquire(&key).await.map_err(Self::lock_error)?;

        let mut stock = self.active_stock(&cmd.sku_id, &cmd.location_id).await?;

        let now = Timestamp::now();
        let previous = stock.available();
        stock.reserve(cmd.quantity, now)?;

        let minutes = cmd
            .expiration_minutes
            .unwrap_or(self.config.reservations.default_expiration_minutes);
        let reservation = Reservation::new(
            stock.id().clone(),
            cmd.sku_id.clone(),
            cmd.location_id.clone(),
            cmd.order_id.clone(),
            cmd.quantity,
            cmd.reserved_by.clone(),
            now.plus_minutes(minutes),
            now,
        );
        let movement = StockMovement::record(
            stock.id().clone(),
            MovementKind::Reservation,
            previous,
            stock.available(),
            cmd.reserved_by,
            now,
        )
        .for_order(cmd.order_id.clone())
        .for_reservation(reservation.id().clone())
        .with_reason("Stock reserved for order");

        let mut events = vec![StockEvent::StockReserved(StockReserved {
            reservation_id: reservation.id().clone(),
            stock_id: stock.id().clone(),
            order_id: cmd.order_id,
            quantity: cmd.quantity,
            expires_at: reservation.expires_at(),
            occurred_at: now,
        })];
        if stock.is_below_reorder_point() {
            events.push(Self::low_stock_event(&stock, now));
        }

        self.store
            .commit(
                CommitBatch::new()
                    .with_stock(stock.clone())
                    .with_reservation(reservation.clone())
                    .with_movement(movement),
            )
            .await?;

        tracing::info!(
            reservation_id = %reservation.id(),
            stock_id = %stock.id(),
            quantity = %cmd.quantity,
            available = %stock.available(),
            "stock reserved"
        );
        self.publish(events).await;

        Ok(reservation)
    }

    /// Release an active reservation, returning its units to available.
    ///
    /// A second release of the same reservation fails with
    /// `InvalidReservationState` rather than double-crediting stock.
    ///
    /// # Errors
    ///
    /// Returns `ReservationNotFound` or `InvalidReservationState`; on
    /// failure nothing is written.
    pub async fn release(
        &self,
        reservation_id: &ReservationId,
        reason: Option<String>,
    ) -> Result<Reservation, StockError> {
        self.reverse_reservation(reservation_id, reason, false).await
    }

    /// Expire an active reservation past its deadline.
    ///
    /// Behaves exactly like release but the final status is Expired. The
    /// deadline is advisory until this is called, either lazily or by the
    /// sweeper.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` if the deadline has not passed, and the
    /// same errors as release otherwise.
    pub async fn expire_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, StockError> {
        self.reverse_reservation(reservation_id, None, true).await
    }

    /// Expire every active reservation past its deadline.
    ///
    /// Losers of a concurrent release/expire race and contended records
    /// are skipped, not errors; the next sweep picks up whatever remains.
    ///
    /// # Errors
    ///
    /// Returns error only if the due-reservation query itself fails.
    pub async fn expire_due_reservations(&self) -> Result<Vec<ReservationId>, StockError> {
        let due = self.store.find_due_reservations(Timestamp::now()).await?;
        let mut expired = Vec::new();

        for reservation in due {
            match self.expire_reservation(reservation.id()).await {
                Ok(_) => expired.push(reservation.id().clone()),
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        reservation_id = %reservation.id(),
                        "skipping contended reservation during sweep: {}",
                        e
                    );
                }
                Err(e) => {
                    tracing::debug!(
                        reservation_id = %reservation.id(),
                        "reservation no longer expirable: {}",
                        e
                    );
                }
            }
        }

        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "expired overdue reservations");
        }
        Ok(expired)
    }

    /// Fulfill an active reservation: the held units ship and leave the
    /// reserved pool. Available is untouched, so the availability ledger
    /// gets no entry; the fulfilled reservation row is the audit record.
    ///
    /// # Errors
    ///
    /// Returns `ReservationNotFound` or `InvalidReservationState`.
    pub async fn fulfill_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, StockError> {
        let found = self.reservation_checked(reservation_id).await?;

        let key = Self::stock_key(found.sku_id(), found.location_id());
        let _guard = self.locks.acquire(&key).await.map_err(Self::lock_error)?;

        // Re-read under the lock; a concurrent release or expiry may have
        // won the race.
        let mut reservation = self.reservation_checked(reservation_id).await?;
        let mut stock = self.stock_by_id(reservation.stock_id()).await?;

        let now = Timestamp::now();
        reservation.fulfill(now)?;
        stock.consume_reserved(reservation.quantity(), now)?;

        self.store
            .commit(
                CommitBatch::new()
                    .with_stock(stock.clone())
                    .with_reservation(reservation.clone()),
            )
            .await?;

        tracing::info!(
            reservation_id = %reservation.id(),
            stock_id = %stock.id(),
            quantity = %reservation.quantity(),
            "reservation fulfilled"
        );
        self.publish(vec![StockEvent::ReservationFulfilled(ReservationFulfilled {
            reservation_id: reservation.id().clone(),
            stock_id: stock.id().clone(),
            order_id: reservation.order_id().clone(),
            quantity: reservation.quantity(),
            occurred_at: now,
        })])
        .await;

        Ok(reservation)
    }

    /// Adjust the available quantity of a stock record directly.
    ///
    /// Restocks, damage write-offs, returns, transfers, and manual
    /// corrections all pass through here. The movement records the delta
    /// actually applied after clamping at zero, which keeps the ledger
    /// replayable.
    ///
    /// # Errors
    ///
    /// Returns `StockNotFound` for an unknown or deactivated identity; on
    /// failure nothing is written.
    pub async fn adjust(&self, cmd: AdjustStockCommand) -> Result<StockRecord, StockError> {
        cmd.validate()?;

        let key = Self::stock_key(&cmd.sku_id, &cmd.location_id);
        let _guard = self.locks.acquire(&key).await.map_err(Self::lock_error)?;

        let mut stock = self.active_stock(&cmd.sku_id, &cmd.location_id).await?;

        let now = Timestamp::now();
        let previous = stock.available();
        let applied = stock.apply_adjustment(cmd.quantity, now);

        let mut movement = StockMovement::record(
            stock.id().clone(),
            cmd.kind,
            previous,
            stock.available(),
            cmd.performed_by,
            now,
        );
        if let Some(reason) = &cmd.reason {
            movement = movement.with_reason(reason.clone());
        }
        if let Some(notes) = &cmd.notes {
            movement = movement.with_notes(notes.clone());
        }

        let mut events = vec![StockEvent::StockAdjusted(StockAdjusted {
            stock_id: stock.id().clone(),
            kind: cmd.kind,
            requested: cmd.quantity,
            applied,
            previous_quantity: previous,
            new_quantity: stock.available(),
            occurred_at: now,
        })];
        if stock.is_below_reorder_point() {
            events.push(Self::low_stock_event(&stock, now));
        }

        self.store
            .commit(
                CommitBatch::new()
                    .with_stock(stock.clone())
                    .with_movement(movement),
            )
            .await?;

        if applied != cmd.quantity {
            tracing::warn!(
                stock_id = %stock.id(),
                requested = %cmd.quantity,
                applied = %applied,
                "adjustment clamped at zero"
            );
        }
        self.publish(events).await;

        Ok(stock)
    }

    /// Soft-remove a stock record. The identity stays occupied and the
    /// movement history stays replayable.
    ///
    /// # Errors
    ///
    /// Returns `StockNotFound` if the identity is unknown or already
    /// deactivated.
    pub async fn deactivate_stock(
        &self,
        sku_id: &SkuId,
        location_id: &LocationId,
    ) -> Result<StockRecord, StockError> {
        let key = Self::stock_key(sku_id, location_id);
        let _guard = self.locks.acquire(&key).await.map_err(Self::lock_error)?;

        let mut stock = self.active_stock(sku_id, location_id).await?;
        stock.deactivate(Timestamp::now());

        self.store
            .commit(CommitBatch::new().with_stock(stock.clone()))
            .await?;

        tracing::info!(stock_id = %stock.id(), "stock record deactivated");
        Ok(stock)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current stock for one (SKU, location) identity.
    ///
    /// # Errors
    ///
    /// Returns `StockNotFound` if the identity is unknown or deactivated.
    pub async fn get_stock(
        &self,
        sku_id: &SkuId,
        location_id: &LocationId,
    ) -> Result<StockRecord, StockError> {
        self.active_stock(sku_id, location_id).await
    }

    /// All active stock records for a SKU across locations.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn get_stock_by_sku(&self, sku_id: &SkuId) -> Result<Vec<StockRecord>, StockError> {
        self.store.find_stock_by_sku(sku_id).await
    }

    /// Active records at or below a threshold: the explicit one when
    /// given, each record's own reorder point otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn get_low_stock(
        &self,
        threshold: Option<Quantity>,
    ) -> Result<Vec<StockRecord>, StockError> {
        self.store.find_low_stock(threshold).await
    }

    /// Movement history for one stock record, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StockIdNotFound` for an unknown stock id.
    pub async fn get_movements(
        &self,
        stock_id: &StockId,
    ) -> Result<Vec<StockMovement>, StockError> {
        if self.store.find_stock_by_id(stock_id).await?.is_none() {
            return Err(StockError::StockIdNotFound {
                stock_id: stock_id.as_str().to_string(),
            });
        }
        self.store.movements_for_stock(stock_id).await
    }

    /// A reservation by id.
    ///
    /// # Errors
    ///
    /// Returns `ReservationNotFound` if unknown.
    pub async fn get_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, StockError> {
        self.store
            .find_reservation(reservation_id)
            .await?
            .ok_or_else(|| StockError::ReservationNotFound {
                reservation_id: reservation_id.clone(),
            })
    }

    /// Every reservation belonging to an order, any status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn get_reservations_for_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<Reservation>, StockError> {
        self.store.find_reservations_for_order(order_id).await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Shared reversal path for release and expiry. Both re-read the
    /// reservation under the stock record's lock so the loser of a race
    /// observes a terminal status and fails cleanly.
    async fn reverse_reservation(
        &self,
        reservation_id: &ReservationId,
        reason: Option<String>,
        expire: bool,
    ) -> Result<Reservation, StockError> {
        // Fail fast before taking the lock; the authoritative check
        // happens again under it.
        let found = self.reservation_checked(reservation_id).await?;

        let key = Self::stock_key(found.sku_id(), found.location_id());
        let _guard = self.locks.acquire(&key).await.map_err(Self::lock_error)?;

        let mut reservation = self.reservation_checked(reservation_id).await?;
        let mut stock = self.stock_by_id(reservation.stock_id()).await?;

        let now = Timestamp::now();
        if expire {
            if !reservation.is_past_deadline(now) {
                return Err(StockError::InvalidParameters {
                    field: "expires_at".to_string(),
                    message: format!(
                        "reservation {reservation_id} does not expire until {}",
                        reservation.expires_at()
                    ),
                });
            }
            reservation.expire(now)?;
        } else {
            reservation.cancel(now, reason.clone())?;
        }

        let previous = stock.available();
        stock.release_reserved(reservation.quantity(), now)?;

        let mut movement = StockMovement::record(
            stock.id().clone(),
            MovementKind::Release,
            previous,
            stock.available(),
            reservation.reserved_by().clone(),
            now,
        )
        .for_order(reservation.order_id().clone())
        .for_reservation(reservation.id().clone());
        movement = match (&reason, expire) {
            (Some(reason), _) => movement.with_reason(reason.clone()),
            (None, true) => movement.with_reason("Reservation expired"),
            (None, false) => movement.with_reason("Reservation released"),
        };

        self.store
            .commit(
                CommitBatch::new()
                    .with_stock(stock.clone())
                    .with_reservation(reservation.clone())
                    .with_movement(movement),
            )
            .await?;

        tracing::info!(
            reservation_id = %reservation.id(),
            stock_id = %stock.id(),
            quantity = %reservation.quantity(),
            expired = expire,
            "reservation reversed"
        );
        self.publish(vec![StockEvent::StockReleased(StockReleased {
            reservation_id: reservation.id().clone(),
            stock_id: stock.id().clone(),
            order_id: reservation.order_id().clone(),
            quantity: reservation.quantity(),
            expired: expire,
            reason,
            occurred_at: now,
        })])
        .await;

        Ok(reservation)
    }

    /// Look up a reservation and require it to be Active.
    async fn reservation_checked(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, StockError> {
        let reservation = self.get_reservation(reservation_id).await?;
        if !reservation.status().is_active() {
            return Err(StockError::InvalidReservationState {
                reservation_id: reservation_id.clone(),
                status: reservation.status(),
            });
        }
        Ok(reservation)
    }

    /// Look up a stock record by identity and require it to be active.
    async fn active_stock(
        &self,
        sku_id: &SkuId,
        location_id: &LocationId,
    ) -> Result<StockRecord, StockError> {
        match self.store.find_stock(sku_id, location_id).await? {
            Some(stock) if stock.is_active() => Ok(stock),
            _ => Err(StockError::StockNotFound {
                sku_id: sku_id.clone(),
                location_id: location_id.clone(),
            }),
        }
    }

    /// Look up a stock record by id. Deactivated records are still
    /// resolvable here: a hold against a record that was deactivated in
    /// the meantime must remain releasable.
    async fn stock_by_id(&self, stock_id: &StockId) -> Result<StockRecord, StockError> {
        self.store
            .find_stock_by_id(stock_id)
            .await?
            .ok_or_else(|| StockError::StockIdNotFound {
                stock_id: stock_id.as_str().to_string(),
            })
    }

    fn low_stock_event(stock: &StockRecord, now: Timestamp) -> StockEvent {
        StockEvent::LowStock(LowStock {
            stock_id: stock.id().clone(),
            sku_id: stock.sku_id().clone(),
            location_id: stock.location_id().clone(),
            available: stock.available(),
            reorder_point: stock.reorder_point(),
            occurred_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NoOpEventPublisher;
    use crate::infrastructure::persistence::InMemoryInventoryStore;

    fn engine() -> StockEngine<InMemoryInventoryStore, NoOpEventPublisher> {
        StockEngine::new(
            Arc::new(InMemoryInventoryStore::new()),
            Arc::new(NoOpEventPublisher),
            EngineConfig::default(),
        )
    }

    fn create_cmd(sku: &str, initial: i64) -> CreateStockCommand {
        CreateStockCommand {
            sku_id: SkuId::new(sku),
            location_id: LocationId::new("w1"),
            initial_quantity: Quantity::new(initial),
            reorder_point: None,
            max_stock: None,
        }
    }

    fn reserve_cmd(sku: &str, order: &str, quantity: i64) -> ReserveStockCommand {
        ReserveStockCommand {
            sku_id: SkuId::new(sku),
            location_id: LocationId::new("w1"),
            order_id: OrderId::new(order),
            quantity: Quantity::new(quantity),
            reserved_by: ActorId::new("user-1"),
            expiration_minutes: None,
        }
    }

    #[tokio::test]
    async fn create_writes_initial_movement() {
        let engine = engine();
        let record = engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();

        let movements = engine.get_movements(record.id()).await.unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].kind, MovementKind::Initial);
        assert_eq!(movements[0].quantity, Quantity::new(10));
        assert_eq!(movements[0].previous_quantity, Quantity::ZERO);
    }

    #[tokio::test]
    async fn create_duplicate_identity_conflicts() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();

        let err = engine.create_stock(create_cmd("sku-1", 5)).await.unwrap_err();
        assert!(matches!(err, StockError::DuplicateStock { .. }));
    }

    #[tokio::test]
    async fn create_conflicts_even_after_deactivation() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();
        engine
            .deactivate_stock(&SkuId::new("sku-1"), &LocationId::new("w1"))
            .await
            .unwrap();

        let err = engine.create_stock(create_cmd("sku-1", 5)).await.unwrap_err();
        assert!(matches!(err, StockError::DuplicateStock { .. }));
    }

    #[tokio::test]
    async fn reserve_validates_before_lookup() {
        let engine = engine();
        let err = engine.reserve(reserve_cmd("ghost", "ord-1", 0)).await.unwrap_err();
        assert!(matches!(err, StockError::InvalidParameters { .. }));

        let mut cmd = reserve_cmd("ghost", "ord-1", 1);
        cmd.expiration_minutes = Some(0);
        let err = engine.reserve(cmd).await.unwrap_err();
        assert!(matches!(err, StockError::InvalidParameters { .. }));
    }

    #[tokio::test]
    async fn reserve_unknown_sku_not_found() {
        let engine = engine();
        let err = engine.reserve(reserve_cmd("ghost", "ord-1", 1)).await.unwrap_err();
        assert!(matches!(err, StockError::StockNotFound { .. }));
    }

    #[tokio::test]
    async fn reserve_uses_default_expiration() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();

        let before = Timestamp::now();
        let reservation = engine.reserve(reserve_cmd("sku-1", "ord-1", 4)).await.unwrap();

        let deadline = reservation.expires_at().duration_since(before);
        assert!(deadline.num_minutes() >= 29);
        assert!(deadline.num_minutes() <= 31);
    }

    #[tokio::test]
    async fn adjust_rejects_engine_internal_kinds() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();

        for kind in [
            MovementKind::Initial,
            MovementKind::Reservation,
            MovementKind::Release,
        ] {
            let err = engine
                .adjust(AdjustStockCommand {
                    sku_id: SkuId::new("sku-1"),
                    location_id: LocationId::new("w1"),
                    quantity: Quantity::new(1),
                    kind,
                    performed_by: ActorId::new("ops"),
                    reason: None,
                    notes: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, StockError::InvalidParameters { .. }));
        }
    }

    #[tokio::test]
    async fn adjust_rejects_zero_delta() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();

        let err = engine
            .adjust(AdjustStockCommand {
                sku_id: SkuId::new("sku-1"),
                location_id: LocationId::new("w1"),
                quantity: Quantity::ZERO,
                kind: MovementKind::Adjustment,
                performed_by: ActorId::new("ops"),
                reason: None,
                notes: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::InvalidParameters { .. }));
    }

    #[tokio::test]
    async fn deactivated_stock_is_invisible_to_reads() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();
        engine
            .deactivate_stock(&SkuId::new("sku-1"), &LocationId::new("w1"))
            .await
            .unwrap();

        let err = engine
            .get_stock(&SkuId::new("sku-1"), &LocationId::new("w1"))
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::StockNotFound { .. }));

        let by_sku = engine.get_stock_by_sku(&SkuId::new("sku-1")).await.unwrap();
        assert!(by_sku.is_empty());
    }

    #[tokio::test]
    async fn get_movements_unknown_stock_id() {
        let engine = engine();
        let err = engine
            .get_movements(&StockId::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::StockIdNotFound { .. }));
    }

    #[tokio::test]
    async fn expire_before_deadline_is_rejected() {
        let engine = engine();
        engine.create_stock(create_cmd("sku-1", 10)).await.unwrap();
        let reservation = engine.reserve(reserve_cmd("sku-1", "ord-1", 4)).await.unwrap();

        let err = engine
            .expire_reservation(reservation.id())
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::InvalidParameters { .. }));

        // The hold is still live and still counted.
        let stock = engine
            .get_stock(&SkuId::new("sku-1"), &LocationId::new("w1"))
            .await
            .unwrap();
        assert_eq!(stock.reserved(), Quantity::new(4));
    }
}
