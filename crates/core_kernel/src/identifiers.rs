//! Strongly-typed identifiers for domain entities
//!
//! Entity identifiers are database-generated 64-bit integers. Wrapping them
//! in newtypes prevents accidental mixing of different identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the underlying integer value
            pub fn get(&self) -> i64 {
                self.0
            }

            /// Returns true if the identifier is in the range the database generates
            pub fn is_positive(&self) -> bool {
                self.0 > 0
            }

            /// Returns the entity name for error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(OwnerId, "Owner");
define_id!(CarId, "Car");
define_id!(PolicyId, "Policy");
define_id!(ClaimId, "Claim");
define_id!(ExpirationId, "ProcessedExpiration");
