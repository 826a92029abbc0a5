//! Order Lifecycle Value Objects

mod order_status;
mod status_change;

pub use order_status::OrderStatus;
pub use status_change::StatusChange;
