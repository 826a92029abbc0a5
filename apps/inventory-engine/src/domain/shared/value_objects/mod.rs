//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod quantity;
mod timestamp;

pub use identifiers::{ActorId, LocationId, MovementId, OrderId, ReservationId, SkuId, StockId};
pub use quantity::Quantity;
pub use timestamp::Timestamp;
