//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure
//! dependencies. This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Events**: Records of state transitions
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`stock_control`]: quantity state, reservations, movement ledger
//! - [`order_lifecycle`]: order status machine and history

pub mod order_lifecycle;
pub mod shared;
pub mod stock_control;
