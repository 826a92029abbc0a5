//! Infrastructure Layer
//!
//! Adapters implementing the domain's persistence ports. The in-memory
//! store is the reference storage engine; a SQL adapter plugs in behind
//! the same traits.

pub mod persistence;
