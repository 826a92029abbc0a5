//! Order Lifecycle Bounded Context
//!
//! Validates order status transitions against a closed table and keeps an
//! immutable status history. Cancellation is the one privileged
//! transition; it also triggers release of the order's stock holds through
//! the application layer.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: status plus append-only history rows
//! - **State Machine**: exactly the modelled transitions, nothing else
//! - **Cancel → Release**: the cross-context call handled by
//!   `CancelOrderUseCase`

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{CreateOrderCommand, Order, OrderLine};
pub use errors::OrderError;
pub use events::{OrderCancelled, OrderEvent, OrderStatusChanged};
pub use repository::OrderRepository;
pub use services::OrderStateMachine;
pub use value_objects::{OrderStatus, StatusChange};
