//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts. SKU and location
//! identifiers are opaque keys owned by the catalog and warehouse systems;
//! this engine only ever compares and stores them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(SkuId, "Opaque key of a stock-keeping unit (owned by the catalog).");
define_id!(LocationId, "Opaque key of a stocking location (warehouse, store).");
define_id!(StockId, "Unique identifier for a stock record.");
define_id!(ReservationId, "Unique identifier for a stock reservation.");
define_id!(MovementId, "Unique identifier for a stock movement row.");
define_id!(OrderId, "Unique identifier for an order (owned by the order service).");
define_id!(ActorId, "Identifier of the user or system actor performing an operation.");
