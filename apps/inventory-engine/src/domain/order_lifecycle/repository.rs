//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders. Implemented by adapters
//! in the infrastructure layer; the order's status history travels with
//! the aggregate.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;
use crate::domain::shared::OrderId;

/// Repository trait for order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Find all orders with a given status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;
}
