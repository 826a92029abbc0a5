//! Application Layer
//!
//! Use cases and orchestration over the domain: the stock engine itself,
//! the order workflows that drive it, the expiry sweeper, and the ports to
//! the outside world.

pub mod ports;
pub mod services;
pub mod use_cases;
