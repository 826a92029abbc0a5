//! Application Services

mod reservation_sweeper;
mod stock_engine;

pub use reservation_sweeper::{SweeperHandle, spawn_sweeper};
pub use stock_engine::{AdjustStockCommand, ReserveStockCommand, StockEngine};
