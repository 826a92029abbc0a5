// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Inventory Engine - Rust Core Library
//!
//! Stock reservation and movement ledger for the Storefront commerce
//! platform.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `stock_control`: stock records, reservations, movement ledger
//!   - `order_lifecycle`: order status machine and history
//!
//! - **Application**: Use cases and orchestration
//!   - `services`: `StockEngine` (the single mutation path), expiry sweeper
//!   - `use_cases`: `UpdateOrderStatusUseCase`, `CancelOrderUseCase`
//!   - `ports`: `EventPublisherPort`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: in-memory store with atomic batch commit
//!
//! # Guarantees
//!
//! - Conservation: `total = available + reserved` after every committed
//!   operation
//! - No oversell: per-record locking serializes reserve/release/adjust
//! - Idempotent release: a second release fails instead of double-crediting
//! - Ledger completeness: replaying a record's movements from zero
//!   reproduces its available quantity

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Concurrency primitives - keyed locks for per-record serialization.
pub mod concurrency;

/// Configuration loading and validation.
pub mod config;

/// Structured logging setup.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::order_lifecycle::{
    CreateOrderCommand, Order, OrderError, OrderEvent, OrderLine, OrderRepository,
    OrderStateMachine, OrderStatus, StatusChange,
};
pub use domain::shared::{
    ActorId, LocationId, MovementId, OrderId, Quantity, ReservationId, SkuId, StockId, Timestamp,
};
pub use domain::stock_control::{
    CommitBatch, CreateStockCommand, InventoryStore, MovementKind, Reservation, ReservationStatus,
    StockError, StockEvent, StockMovement, StockRecord,
};

// Application re-exports
pub use application::ports::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use application::services::{
    AdjustStockCommand, ReserveStockCommand, StockEngine, SweeperHandle, spawn_sweeper,
};
pub use application::use_cases::{CancelOrderUseCase, CancelOutcome, UpdateOrderStatusUseCase};

// Infrastructure re-exports
pub use config::{EngineConfig, load_config};
pub use infrastructure::persistence::{InMemoryInventoryStore, InMemoryOrderRepository};
