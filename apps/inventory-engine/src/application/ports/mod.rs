//! Application Ports
//!
//! Interfaces to external systems, implemented by infrastructure adapters
//! or by the consuming process.

mod event_publisher_port;

pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
