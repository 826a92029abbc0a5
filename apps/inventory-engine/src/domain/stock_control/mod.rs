//! Stock Control Bounded Context
//!
//! The reservation and movement ledger: quantity state per (SKU, location),
//! time-bounded holds against it, and an append-only audit of every change.
//!
//! # Key Concepts
//!
//! - **StockRecord Aggregate**: conservation invariant
//!   `total = available + reserved` on every mutation
//! - **Reservation**: Active hold that is cancelled, expired, or fulfilled
//! - **Movement Ledger**: replaying a record's movements from zero
//!   reproduces its available quantity

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod value_objects;

pub use aggregate::{CreateStockCommand, Reservation, StockRecord};
pub use errors::StockError;
pub use events::{
    LowStock, ReservationFulfilled, StockAdjusted, StockCreated, StockEvent, StockReleased,
    StockReserved,
};
pub use repository::{CommitBatch, InventoryStore};
pub use value_objects::{MovementKind, ReservationStatus, StockMovement};
